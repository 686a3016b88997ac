use std::path::PathBuf;

use safetyboard_core::{Msg, Status, StatusFilter};

pub const HELP: &str = "\
Type text to search names and categories (an empty line clears the search).
  /status <pass|fail|pending|not_healthy|all>   show one status
  /segment <status>                             click a chart slice (toggles)
  /category <text>                              filter by category
  /reset                                        clear all filters
  /export <dir>                                 write dashboard.html and summary.json
  /help                                         show this help
  /quit                                         exit";

/// One line of interactive input, translated for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Export(PathBuf),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Dispatch(Msg::SearchChanged(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        "reset" => Ok(Command::Dispatch(Msg::ChartCenterClicked)),
        "status" => arg
            .parse::<StatusFilter>()
            .map(|filter| Command::Dispatch(Msg::StatusFilterSelected(filter)))
            .map_err(|err| err.to_string()),
        "segment" => arg
            .parse::<Status>()
            .map(|status| Command::Dispatch(Msg::SegmentClicked(status)))
            .map_err(|err| err.to_string()),
        "category" if !arg.is_empty() => {
            Ok(Command::Dispatch(Msg::CategoryClicked(arg.to_string())))
        }
        "export" if !arg.is_empty() => Ok(Command::Export(PathBuf::from(arg))),
        "category" | "export" => Err(format!("/{name} needs an argument")),
        other => Err(format!("unknown command `/{other}`, try /help")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_search() {
        assert_eq!(
            parse_command("Whey Protein\n"),
            Ok(Command::Dispatch(Msg::SearchChanged("Whey Protein".into())))
        );
        assert_eq!(
            parse_command(""),
            Ok(Command::Dispatch(Msg::SearchChanged(String::new())))
        );
    }

    #[test]
    fn slash_commands_map_to_messages() {
        assert_eq!(
            parse_command("/status not-healthy"),
            Ok(Command::Dispatch(Msg::StatusFilterSelected(
                StatusFilter::Only(Status::NotHealthy)
            )))
        );
        assert_eq!(
            parse_command("/status all"),
            Ok(Command::Dispatch(Msg::StatusFilterSelected(StatusFilter::All)))
        );
        assert_eq!(
            parse_command("/segment fail"),
            Ok(Command::Dispatch(Msg::SegmentClicked(Status::Fail)))
        );
        assert_eq!(
            parse_command("/category peanut butter"),
            Ok(Command::Dispatch(Msg::CategoryClicked("peanut butter".into())))
        );
        assert_eq!(
            parse_command("/reset"),
            Ok(Command::Dispatch(Msg::ChartCenterClicked))
        );
        assert_eq!(
            parse_command("/export out"),
            Ok(Command::Export(PathBuf::from("out")))
        );
        assert_eq!(parse_command("/quit"), Ok(Command::Quit));
    }

    #[test]
    fn bad_commands_are_rejected() {
        assert!(parse_command("/status maybe").is_err());
        assert!(parse_command("/category").is_err());
        assert!(parse_command("/dance").is_err());
    }
}
