use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use mjc::{ast, parser, Config};

#[derive(Parser)]
#[command(name = "mjc")]
#[command(about = "MiniJava compiler front end")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and type check a MiniJava source file
    Check {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Echo every token produced by the lexer
        #[arg(long)]
        dump_tokens: bool,

        /// Pretty-print the AST after parsing
        #[arg(long)]
        dump_ast: bool,

        /// Dump the class table once pass 1 has built it
        #[arg(long)]
        dump_class_table: bool,

        /// Dump each method table during pass 2
        #[arg(long)]
        dump_method_table: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a source file and show the AST
    Parse {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the raw tree instead of pretty-printed source
        #[arg(short, long)]
        detailed: bool,
    },

    /// Lexically analyze a source file
    Lex {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show token locations
        #[arg(short, long)]
        locations: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check {
            input,
            dump_tokens,
            dump_ast,
            dump_class_table,
            dump_method_table,
            verbose,
        } => {
            let config = Config {
                dump_tokens: *dump_tokens,
                dump_ast: *dump_ast,
                dump_class_table: *dump_class_table,
                dump_method_table: *dump_method_table,
            };
            check_file(input, &config, *verbose)?;
        }
        Commands::Parse { input, detailed } => {
            parse_file(input, *detailed)?;
        }
        Commands::Lex { input, locations } => {
            lex_file(input, *locations)?;
        }
    }

    Ok(())
}

fn check_file(input: &PathBuf, config: &Config, verbose: bool) -> Result<()> {
    if verbose {
        println!("Checking {}...", input.display());
    }

    let source = fs::read_to_string(input)?;
    mjc::check_source(&source, config)?;
    Ok(())
}

fn parse_file(input: &PathBuf, detailed: bool) -> Result<()> {
    let source = fs::read_to_string(input)?;
    let program = parser::parse(&source, &Config::default())?;

    if detailed {
        println!("{:#?}", program);
    } else {
        print!("{}", ast::pretty(&program));
    }

    Ok(())
}

fn lex_file(input: &PathBuf, locations: bool) -> Result<()> {
    let source = fs::read_to_string(input)?;
    let tokens = parser::Lexer::new(&source)
        .tokenize()
        .map_err(mjc::Error::from)?;

    for token in tokens {
        if locations {
            println!(
                "{:?} '{}' at {}:{}",
                token.token, token.lexeme, token.location.line, token.location.column
            );
        } else {
            println!("{:?} '{}'", token.token, token.lexeme);
        }
    }

    Ok(())
}
