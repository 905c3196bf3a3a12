use clap::Parser;
use std::path::PathBuf;

/// Merge province exposure with VIIRS nighttime lights into one monthly panel
#[derive(Debug, Parser)]
#[command(name = "lights_merge", version)]
pub struct Cli {
    /// Wide exposure CSV (region column, then one column per YYYY-MM)
    #[arg(long, default_value = "exposure.csv")]
    pub exposure: PathBuf,

    /// Long lights CSV with province, year, month, mean_lights
    #[arg(long, default_value = "lights.csv")]
    pub lights: PathBuf,

    /// Where to write the merged panel
    #[arg(short, long, default_value = "final_merged.csv")]
    pub output: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_usual_file_names() {
        let cli = Cli::parse_from(["lights_merge"]);
        assert_eq!(cli.exposure, PathBuf::from("exposure.csv"));
        assert_eq!(cli.lights, PathBuf::from("lights.csv"));
        assert_eq!(cli.output, PathBuf::from("final_merged.csv"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn paths_and_verbosity_override() {
        let cli = Cli::parse_from([
            "lights_merge",
            "--exposure",
            "data/exp.csv",
            "-o",
            "out.csv",
            "-vv",
        ]);
        assert_eq!(cli.exposure, PathBuf::from("data/exp.csv"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert_eq!(cli.verbose, 2);
    }
}
