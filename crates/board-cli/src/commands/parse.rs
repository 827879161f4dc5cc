use std::io::Read;

use anyhow::Context;
use board_parser::parse_insight;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParseArgs;
use crate::output::{brief_view, output};

/// Handle `boardroom parse`.
pub fn handle(args: &ParseArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_input(args)?;
    if args.brief {
        output(&brief_view(&text), flags.format)
    } else {
        output(&parse_insight(&text), flags.format)
    }
}

fn read_input(args: &ParseArgs) -> anyhow::Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
