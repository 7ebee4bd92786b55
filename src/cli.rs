//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_SETTINGS_FILE: &str = "pitchdeck.json";

#[derive(Parser, Debug)]
#[command(
    name = "pitchdeck",
    about = "Headless pitch deck driven by line commands on stdin",
    after_help = "\
COMMANDS:
    next, prev, goto <n>, first, last, auto [ms], stop,
    present, end, refresh, snapshot, export [path], quit"
)]
pub struct Args {
    /// Deck settings file (JSON); defaults are used when it does not exist
    #[arg(value_name = "SETTINGS", env = "PITCHDECK_SETTINGS", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_path_defaults_when_absent() {
        let args = Args::try_parse_from(["pitchdeck"]).unwrap();
        // PITCHDECK_SETTINGS may be set in the environment running the tests.
        if std::env::var_os("PITCHDECK_SETTINGS").is_none() {
            assert_eq!(args.settings, PathBuf::from(DEFAULT_SETTINGS_FILE));
        }
    }

    #[test]
    fn positional_settings_path_wins() {
        let args = Args::try_parse_from(["pitchdeck", "decks/seed.json"]).unwrap();
        assert_eq!(args.settings, PathBuf::from("decks/seed.json"));
    }

    #[test]
    fn rejects_extra_arguments() {
        assert!(Args::try_parse_from(["pitchdeck", "a.json", "b.json"]).is_err());
    }
}
