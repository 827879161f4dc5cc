use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `boardroom` binary.
#[derive(Debug, Parser)]
#[command(
    name = "boardroom",
    version,
    about = "Boardroom - executive intelligence from cited answers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use board_core::enums::InsightKind;
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::context::AlertPreset;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["boardroom", "--format", "raw", "--verbose", "parse"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Parse(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["boardroom", "serve", "--quiet", "--bind", "0.0.0.0:8080"])
            .expect("cli should parse");

        assert!(cli.quiet);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["boardroom", "--format", "table", "parse"]).is_err());
    }

    #[test]
    fn ask_parses_kind_and_title() {
        let cli = Cli::try_parse_from([
            "boardroom",
            "ask",
            "What changed?",
            "--kind",
            "alert",
            "--title",
            "Weekly",
        ])
        .expect("cli should parse");

        let Commands::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.question, "What changed?");
        assert_eq!(args.kind, InsightKind::Alert);
        assert_eq!(args.title.as_deref(), Some("Weekly"));
    }

    #[test]
    fn ask_defaults_to_board_pack() {
        let cli = Cli::try_parse_from(["boardroom", "ask", "q"]).expect("cli should parse");
        let Commands::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.kind, InsightKind::BoardPack);
    }

    #[test]
    fn ask_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["boardroom", "ask", "q", "--kind", "memo"]).is_err());
    }

    #[test]
    fn alert_takes_several_presets_and_pin() {
        let cli = Cli::try_parse_from([
            "boardroom",
            "alert",
            "market-risk",
            "competitor",
            "--pin",
            "2",
        ])
        .expect("cli should parse");

        let Commands::Alert(args) = cli.command else {
            panic!("expected alert");
        };
        assert_eq!(
            args.presets,
            vec![AlertPreset::MarketRisk, AlertPreset::Competitor]
        );
        assert_eq!(args.pin, Some(2));
    }

    #[test]
    fn alert_requires_a_preset() {
        assert!(Cli::try_parse_from(["boardroom", "alert"]).is_err());
    }

    #[test]
    fn board_pack_takes_no_arguments() {
        let cli = Cli::try_parse_from(["boardroom", "board-pack"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::BoardPack));
        assert!(Cli::try_parse_from(["boardroom", "board-pack", "extra"]).is_err());
    }

    #[test]
    fn brief_collects_repeated_saves() {
        let cli = Cli::try_parse_from(["boardroom", "brief", "--save", "1", "--save", "3"])
            .expect("cli should parse");
        let Commands::Brief(args) = cli.command else {
            panic!("expected brief");
        };
        assert_eq!(args.save, vec![1, 3]);
    }

    #[test]
    fn scenario_save_needs_a_scenario() {
        let cli = Cli::try_parse_from(["boardroom", "scenario", "What if GM cuts prices?", "--save"])
            .expect("cli should parse");
        let Commands::Scenario(args) = cli.command else {
            panic!("expected scenario");
        };
        assert_eq!(args.scenario.as_deref(), Some("What if GM cuts prices?"));
        assert!(args.save);

        assert!(Cli::try_parse_from(["boardroom", "scenario", "--save"]).is_err());
    }
}
