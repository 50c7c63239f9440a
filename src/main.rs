use std::io::{self, BufRead, Write};

use pandrs_eda::{EdaConfig, Error, Session};

const HELP: &str = "\
commands:
  load <path>        load a .csv file and show the dataset overview
  column <name>      univariate analysis of one column
  compare <a> <b>    bivariate analysis of two columns; quote names with
                     spaces, as in compare \"Unnamed: 2\" price
  json               dataset overview as JSON
  help               show this message
  quit               exit";

enum Command<'a> {
    Load(&'a str),
    Column(&'a str),
    Compare(&'a str, &'a str),
    Json,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse(line: &str) -> Command<'_> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "" => Command::Empty,
        "load" if !rest.is_empty() => Command::Load(unquote(rest)),
        "column" if !rest.is_empty() => Command::Column(unquote(rest)),
        "compare" => match split_args(rest).as_slice() {
            [a, b] => Command::Compare(*a, *b),
            _ => Command::Invalid("usage: compare <a> <b>".to_string()),
        },
        "load" | "column" => Command::Invalid(format!("usage: {} <{}>", cmd, if cmd == "load" { "path" } else { "name" })),
        "json" => Command::Json,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Split on whitespace, keeping double-quoted arguments whole
fn split_args(args: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = args.trim_start();
    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            out.push(&quoted[..end]);
            rest = quoted.get(end + 1..).unwrap_or("").trim_start();
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            out.push(&rest[..end]);
            rest = rest[end..].trim_start();
        }
    }
    out
}

fn unquote(arg: &str) -> &str {
    arg.strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .unwrap_or(arg)
}

fn run(session: &mut Session, command: Command<'_>) -> Result<Option<String>, Error> {
    let output = match command {
        Command::Load(path) => {
            session.upload_path(path)?;
            session.render_overview()
        }
        Command::Column(name) => {
            let analysis = session.select_column(name)?;
            Some(session.render_univariate(&analysis))
        }
        Command::Compare(a, b) => {
            let analysis = session.compare(a, b)?;
            Some(session.render_bivariate(&analysis))
        }
        Command::Json => match session.overview() {
            Some(overview) => Some(overview.to_json()?),
            None => Some("no dataset loaded".to_string()),
        },
        Command::Help => Some(HELP.to_string()),
        Command::Invalid(msg) => Some(msg),
        Command::Empty | Command::Quit => None,
    };
    Ok(output)
}

fn main() -> io::Result<()> {
    env_logger::builder().format_target(false).init();

    let mut session = Session::new(EdaConfig::default());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "pandrs-eda {}. Upload a CSV file with 'load <path>'.", pandrs_eda::VERSION)?;
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = parse(&line);
        if matches!(command, Command::Quit) {
            break;
        }

        match run(&mut session, command) {
            Ok(Some(text)) => writeln!(stdout, "{}", text.trim_end())?,
            Ok(None) => {}
            Err(err) => writeln!(stdout, "{}", err.user_message())?,
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_plain_names() {
        assert!(matches!(parse("compare age height"), Command::Compare("age", "height")));
        assert!(matches!(parse("compare age"), Command::Invalid(_)));
        assert!(matches!(parse("compare a b c"), Command::Invalid(_)));
    }

    #[test]
    fn test_compare_quoted_names() {
        assert!(matches!(
            parse(r#"compare "Unnamed: 2" price"#),
            Command::Compare("Unnamed: 2", "price")
        ));
        assert!(matches!(
            parse(r#"compare  "first name"   "last name" "#),
            Command::Compare("first name", "last name")
        ));
    }

    #[test]
    fn test_column_accepts_spaces_and_quotes() {
        assert!(matches!(parse("column Unnamed: 2"), Command::Column("Unnamed: 2")));
        assert!(matches!(parse(r#"column "Unnamed: 2""#), Command::Column("Unnamed: 2")));
        assert!(matches!(parse("column"), Command::Invalid(_)));
    }
}
