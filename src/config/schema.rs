use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scoring::PointConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// YAML file listing tournaments and fantasy teams
    pub league: PathBuf,
    /// Root of the `<series_id>/<match_id>.json` tree
    pub matches_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
    /// Overrides for individual point rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<PointConfig>,
}

impl Config {
    /// Effective point table: the override if given, otherwise the standard one
    pub fn points(&self) -> PointConfig {
        self.points.clone().unwrap_or_default()
    }

    /// Make relative paths relative to the directory holding the config file
    pub(crate) fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.league);
        resolve(&mut self.matches_dir);
        if let Some(state_file) = self.state_file.as_mut() {
            resolve(state_file);
        }
    }
}
