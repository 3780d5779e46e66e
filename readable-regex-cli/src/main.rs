use clap::{Parser, Subcommand};
use colored::Colorize;
use readable_regex::{Pattern, PatternFlags, ReadableRegex, ReadableRegexError, Result, regex};

#[derive(Parser)]
#[command(name = "readable-regex")]
#[command(about = "Assemble regular expressions from readable building blocks")]
#[command(version)]
struct Cli {
    /// Flags to finish the pattern with: any of `i`, `m`, `s`
    #[arg(short, long, global = true, default_value = "")]
    flags: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the assembled pattern
    Build {
        /// Building operations, e.g. `literal=abc digit one-or-more`
        #[arg(required = true)]
        ops: Vec<String>,
    },
    /// Test the assembled pattern against input
    Test {
        /// The input string to test
        #[arg(short, long)]
        input: String,
        /// Require the pattern to match the complete input
        #[arg(short, long)]
        exact: bool,
        /// Show capture groups
        #[arg(short, long)]
        verbose: bool,
        /// Building operations
        #[arg(required = true)]
        ops: Vec<String>,
    },
    /// Find all occurrences in input
    Find {
        /// The input string
        #[arg(short, long)]
        input: String,
        /// Building operations
        #[arg(required = true)]
        ops: Vec<String>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let flags = match PatternFlags::from_letters(&cli.flags) {
        Ok(flags) => flags,
        Err(e) => fail(&e),
    };

    match cli.command {
        Commands::Build { ops } => cmd_build(&ops, flags),
        Commands::Test {
            input,
            exact,
            verbose,
            ops,
        } => cmd_test(&ops, flags, &input, exact, verbose),
        Commands::Find { input, ops } => cmd_find(&ops, flags, &input),
    }
}

/// Log to stderr when `RUST_LOG` is set, e.g. `RUST_LOG=readable_regex=trace`
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn fail(error: &ReadableRegexError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), error);
    std::process::exit(1);
}

fn invalid(message: String) -> ReadableRegexError {
    ReadableRegexError::InvalidArgument(message)
}

fn number(op: &str, value: Option<&str>) -> Result<u32> {
    let value = value.ok_or_else(|| invalid(format!("'{op}' needs a number, e.g. {op}=2")))?;
    value
        .parse()
        .map_err(|_| invalid(format!("'{value}' is not a valid count for '{op}'")))
}

fn text<'a>(op: &str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| invalid(format!("'{op}' needs a value, e.g. {op}=abc")))
}

/// Apply one `name` or `name=value` token to the builder
fn apply_op(builder: ReadableRegex, token: &str) -> Result<ReadableRegex> {
    let (op, value) = match token.split_once('=') {
        Some((op, value)) => (op, Some(value)),
        None => (token, None),
    };

    match op {
        "literal" => Ok(builder.literal(text(op, value)?)),
        "raw" => Ok(builder.regex_from_string(text(op, value)?)),
        "digit" => Ok(builder.digit()),
        "whitespace" => Ok(builder.whitespace()),
        "tab" => Ok(builder.tab()),
        "word-char" => Ok(builder.word_character()),
        "non-word-char" => Ok(builder.non_word_character()),
        "word-boundary" => Ok(builder.word_boundary()),
        "non-word-boundary" => Ok(builder.non_word_boundary()),
        "any" => Ok(builder.any_character()),
        "word" => builder.word(),
        "anything" => builder.anything(),
        "start-of-line" => Ok(builder.start_of_line()),
        "end-of-line" => Ok(builder.end_of_line()),
        "start-of-input" => Ok(builder.start_of_input()),
        "end-of-input" => Ok(builder.end_of_input()),
        "range" => builder.range(&text(op, value)?.chars().collect::<Vec<_>>()),
        "not-in-range" => builder.not_in_range(&text(op, value)?.chars().collect::<Vec<_>>()),
        "any-of" => builder.any_character_of(text(op, value)?),
        "any-except" => builder.any_character_except(text(op, value)?),
        "one-or-more" => builder.one_or_more(),
        "optional" => builder.optional(),
        "zero-or-more" => builder.zero_or_more(),
        "exactly" => builder.exactly_n_times(number(op, value)?),
        "at-least" => builder.at_least_n_times(number(op, value)?),
        "at-most" => builder.at_most_n_times(number(op, value)?),
        "between" => {
            let (n, m) = text(op, value)?
                .split_once(',')
                .ok_or_else(|| invalid("'between' needs two numbers, e.g. between=1,3".into()))?;
            builder.between_n_and_m_times(number(op, Some(n))?, number(op, Some(m))?)
        }
        "reluctant" => builder.reluctant(),
        "possessive" => builder.possessive(),
        "group" => match value {
            Some(name) => builder.start_named_group(name),
            None => Ok(builder.start_group()),
        },
        "unnamed-group" => Ok(builder.start_unnamed_group()),
        "lookbehind" => Ok(builder.start_positive_lookbehind()),
        "not-lookbehind" => Ok(builder.start_negative_lookbehind()),
        "lookahead" => Ok(builder.start_positive_lookahead()),
        "not-lookahead" => Ok(builder.start_negative_lookahead()),
        "end" => builder.end_group(),
        other => Err(invalid(format!("unknown operation '{other}'"))),
    }
}

fn assemble(ops: &[String], flags: PatternFlags) -> Pattern {
    let result = ops
        .iter()
        .try_fold(regex(), |builder, token| apply_op(builder, token))
        .and_then(|builder| builder.build_with_flags(flags));
    match result {
        Ok(pattern) => pattern,
        Err(e) => fail(&e),
    }
}

fn cmd_build(ops: &[String], flags: PatternFlags) {
    let pattern = assemble(ops, flags);

    println!("{}", "Pattern:".bold());
    println!("  {}", pattern.as_str().green());
    if !pattern.enabled_flags().is_empty() {
        println!("  Flags:  {}", pattern.enabled_flags().letters().cyan());
    }
    if pattern.group_count() > 0 {
        println!("  Groups: {}", group_list(&pattern).cyan());
    }
}

fn group_list(pattern: &Pattern) -> String {
    pattern
        .groups()
        .iter()
        .enumerate()
        .map(|(i, name)| match name {
            Some(name) => format!("{}:{}", i + 1, name),
            None => (i + 1).to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_test(ops: &[String], flags: PatternFlags, input: &str, exact: bool, verbose: bool) {
    let pattern = assemble(ops, flags);

    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", pattern.as_str().cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    let captures = if exact {
        pattern.exact_captures(input)
    } else {
        pattern.captures(input)
    };

    match captures {
        Ok(Some(caps)) => {
            println!("{}", "✓ Match found!".green().bold());
            if let Some(m) = caps.get(0) {
                println!("  Position: {}..{}", m.start(), m.end());
                println!("  Match:    {}", m.as_str().green());
            }

            if verbose && caps.len() > 1 {
                println!();
                println!("{}", "Capture groups:".bold());
                for idx in 1..caps.len() {
                    let label = pattern
                        .groups()
                        .get(idx - 1)
                        .and_then(|name| name.clone())
                        .unwrap_or_else(|| idx.to_string());
                    match caps.get(idx) {
                        Some(m) => println!(
                            "  Group {}: {}..{} = {}",
                            label,
                            m.start(),
                            m.end(),
                            m.as_str().green()
                        ),
                        None => println!("  Group {}: {}", label, "(no match)".dimmed()),
                    }
                }
            }
        }
        Ok(None) => {
            println!("{}", "✗ No match".red());
            std::process::exit(1);
        }
        Err(e) => fail(&e.into()),
    }
}

fn cmd_find(ops: &[String], flags: PatternFlags, input: &str) {
    let pattern = assemble(ops, flags);

    let matches = match pattern
        .find_iter(input)
        .collect::<std::result::Result<Vec<_>, _>>()
    {
        Ok(matches) => matches,
        Err(e) => fail(&e.into()),
    };

    if matches.is_empty() {
        println!("{}", "No matches found".red());
    } else {
        println!(
            "{} {}",
            "Found".bold(),
            format!("{} match(es)", matches.len()).green()
        );
        println!();

        for (i, m) in matches.iter().enumerate() {
            println!(
                "  [{}] {}..{} = {}",
                i + 1,
                m.start(),
                m.end(),
                m.as_str().green()
            );
        }
    }
}
