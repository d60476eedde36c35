use clap::{Args, Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use utilclass_parser::{ParseOptions, ParseResult};

#[derive(Parser)]
#[command(name = "utilclass")]
#[command(about = "Parse utility-class notation: variants, groups, important markers")]
#[command(version)]
struct Cli {
    /// Log parser diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parse tree, class list, empty groups and selection as JSON
    Parse {
        #[command(flatten)]
        input: Input,
        #[command(flatten)]
        syntax: SyntaxArgs,
        /// Cursor offset for a point query
        #[arg(long)]
        cursor: Option<usize>,
        /// Use hover adjacency for the cursor
        #[arg(long)]
        hover: bool,
        /// Keep traversing after the cursor is resolved
        #[arg(long)]
        greedy: bool,
    },

    /// Print every class fully qualified, one per line
    Flatten {
        #[command(flatten)]
        input: Input,
        #[command(flatten)]
        syntax: SyntaxArgs,
    },

    /// Print what sits under the cursor as JSON
    Query {
        #[command(flatten)]
        input: Input,
        #[command(flatten)]
        syntax: SyntaxArgs,
        /// Cursor offset
        #[arg(long)]
        cursor: usize,
        /// Use hover adjacency for the cursor
        #[arg(long)]
        hover: bool,
    },

    /// Report empty groups and dangling variants; exit 1 if any are found
    Check {
        #[command(flatten)]
        input: Input,
        #[command(flatten)]
        syntax: SyntaxArgs,
    },
}

#[derive(Args)]
struct Input {
    /// Class text to parse
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    text: Option<String>,

    /// Read the class text from a file
    #[arg(short, long)]
    file: Option<String>,
}

#[derive(Args)]
struct SyntaxArgs {
    /// Variant separator
    #[arg(long, default_value = ":")]
    separator: String,

    /// Treat every run of non-space text as a separate class
    #[arg(long)]
    no_brackets: bool,

    /// Keep a trailing `!` as part of the class name
    #[arg(long)]
    no_important: bool,
}

impl SyntaxArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_separator(self.separator.clone())
            .with_brackets(!self.no_brackets)
            .with_important(!self.no_important)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            input,
            syntax,
            cursor,
            hover,
            greedy,
        } => {
            let mut options = syntax.options().with_hover(hover).with_greedy(greedy);
            options.cursor = cursor;
            cmd_parse(&input, &options)
        }
        Command::Flatten { input, syntax } => cmd_flatten(&input, &syntax.options()),
        Command::Query {
            input,
            syntax,
            cursor,
            hover,
        } => cmd_query(&input, &syntax.options(), cursor, hover),
        Command::Check { input, syntax } => cmd_check(&input, &syntax.options()),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: &Input) -> String {
    if let Some(text) = &input.text {
        return text.clone();
    }
    let path = input.file.as_deref().unwrap_or_default();
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_or_exit<'a>(text: &'a str, options: &ParseOptions) -> ParseResult<'a> {
    match utilclass_parser::parse(text, options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_parse(input: &Input, options: &ParseOptions) {
    let text = read_input(input);
    let result = parse_or_exit(&text, options);
    print_json(&result);
}

fn cmd_flatten(input: &Input, options: &ParseOptions) {
    let text = read_input(input);
    match utilclass_parser::flatten(&text, options) {
        Ok(classes) => {
            for class in classes {
                println!("{class}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_query(input: &Input, options: &ParseOptions, cursor: usize, hover: bool) {
    let text = read_input(input);
    match utilclass_parser::query(&text, cursor, hover, options) {
        Ok(selection) => print_json(&selection),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(input: &Input, options: &ParseOptions) {
    let text = read_input(input);
    let options = options.clone().with_greedy(true);
    let result = parse_or_exit(&text, &options);

    if result.empty.is_empty() {
        eprintln!("OK: {} classes", result.class_list.len());
        return;
    }

    for group in &result.empty {
        let variants: Vec<&str> = group.variants.iter().map(|v| v.text).collect();
        eprintln!(
            "Empty group at {}..{}: {:?} (variants: {})",
            group.span.start,
            group.span.end,
            &text[group.span.start..group.span.end],
            variants.join(&options.separator)
        );
    }
    std::process::exit(1);
}
