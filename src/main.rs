//! codeblock - render source files as highlighted HTML code blocks
//!
//! Usage:
//!   codeblock render `<path>` [--language `<lang>`] [--highlight `<lines>`] [--line-numbers]
//!                           [--diff] [--file-name `<name>`] [--no-copy] [--config `<file>`]
//!   codeblock languages [--config `<file>`]
//!   codeblock tokens `<path>` [--language `<lang>`] [--config `<file>`]

use std::fs;
use std::path::Path;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use codeblock::config::Config;
use codeblock::{render_block, GrammarRegistry, Result, Token};

fn main() {
    init_logging();

    let matches = cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file with render defaults and extra grammars")
}

fn language_arg() -> Arg {
    Arg::new("language")
        .long("language")
        .short('l')
        .help("Language id (e.g., 'c', 'python', 'diff-c'); detected from the extension if omitted")
}

fn cli() -> Command {
    Command::new("codeblock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render source files as syntax-highlighted, copyable HTML code blocks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Print the HTML fragment for a source file")
                .arg(Arg::new("path").help("Source file to render").required(true).index(1))
                .arg(language_arg())
                .arg(
                    Arg::new("highlight")
                        .long("highlight")
                        .short('H')
                        .help("Lines to emphasize, e.g. '5', '6-10', '16-24,32-60' or '{4-7}'"),
                )
                .arg(
                    Arg::new("line-numbers")
                        .long("line-numbers")
                        .short('n')
                        .action(ArgAction::SetTrue)
                        .help("Number each line"),
                )
                .arg(
                    Arg::new("diff")
                        .long("diff")
                        .action(ArgAction::SetTrue)
                        .help("Decorate lines starting with '+' or '-'"),
                )
                .arg(
                    Arg::new("file-name")
                        .long("file-name")
                        .short('f')
                        .help("Filename shown above the block"),
                )
                .arg(
                    Arg::new("no-copy")
                        .long("no-copy")
                        .action(ArgAction::SetTrue)
                        .help("Omit the copy-to-clipboard control"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("languages")
                .about("List available grammars")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token tree of a source file")
                .arg(Arg::new("path").help("Source file to tokenize").required(true).index(1))
                .arg(language_arg())
                .arg(config_arg()),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("render", m)) => handle_render_command(m),
        Some(("languages", m)) => handle_languages_command(m),
        Some(("tokens", m)) => handle_tokens_command(m),
        _ => unreachable!("clap requires a subcommand"),
    }
}

/// Load the config (if given) and build a registry with its grammars
fn load(matches: &ArgMatches) -> Result<(Config, GrammarRegistry)> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    let mut registry = GrammarRegistry::with_builtins();
    config.apply_to(&mut registry)?;
    Ok((config, registry))
}

/// Language from the flag, else from the file extension
fn language_for(matches: &ArgMatches, registry: &GrammarRegistry, path: &str) -> Option<String> {
    matches
        .get_one::<String>("language")
        .cloned()
        .or_else(|| registry.detect(Path::new(path)).map(str::to_string))
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches) -> Result<()> {
    let (config, registry) = load(matches)?;
    let path = matches.get_one::<String>("path").map(String::as_str).unwrap_or_default();
    let source = fs::read_to_string(path)?;

    let language = language_for(matches, &registry, path);
    let mut options = config.render_options(language.as_deref());
    options.highlight_lines = matches.get_one::<String>("highlight").cloned();
    options.show_line_numbers |= matches.get_flag("line-numbers");
    options.diff = matches.get_flag("diff");
    options.file_name = matches.get_one::<String>("file-name").cloned();
    if matches.get_flag("no-copy") {
        options.copyable = false;
    }

    let html = render_block(&source, &options, &registry)?;
    println!("{}", html);
    Ok(())
}

/// Handle the languages command
fn handle_languages_command(matches: &ArgMatches) -> Result<()> {
    let (_, registry) = load(matches)?;
    for id in registry.ids() {
        let grammar = registry.resolve(id);
        if grammar.aliases.is_empty() {
            println!("{}", id);
        } else {
            println!("{} ({})", id, grammar.aliases.join(", "));
        }
    }
    Ok(())
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<()> {
    let (config, registry) = load(matches)?;
    let path = matches.get_one::<String>("path").map(String::as_str).unwrap_or_default();
    let source = fs::read_to_string(path)?;

    let language = language_for(matches, &registry, path).unwrap_or_else(|| config.render.language.clone());
    for token in registry.tokenize(&source, &language) {
        print_token(&token, 0);
    }
    Ok(())
}

fn print_token(token: &Token<'_>, depth: usize) {
    println!("{:indent$}{} {:?}", "", token.category.name(), token.text, indent = depth * 2);
    for child in &token.children {
        print_token(child, depth + 1);
    }
}
