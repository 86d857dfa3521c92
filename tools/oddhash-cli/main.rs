use clap::{Args, Parser, Subcommand};
use oddhash::compiler::parsing;
use oddhash::crack::{self, CrackEvent, CrackOptions, Cracker, Targets};
use oddhash::encoding::{self, Coding};
use oddhash::error::DecodeError;
use oddhash::prelude::{AlgorithmRegistry, Compiled, Compiler, DisplayTree};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::time::Instant;

/// Configurable password hasher and cracker for hashes in unusual formats
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a single password
    Hash {
        #[command(flatten)]
        format: FormatArgs,
        /// The password to hash
        #[arg(value_parser = utf8_bytes)]
        password: Bytes,
    },
    /// Search a wordlist for passwords matching the given hashes
    Crack {
        #[command(flatten)]
        format: FormatArgs,
        /// Wordlist to use for cracking, one candidate per line
        wordlist: String,
        /// Hashes to crack (hex by default); "@file" reads one hash per line
        #[arg(required = true, num_args = 1..)]
        hashes: Vec<String>,
        /// Worker threads (defaults to the number of CPUs)
        #[arg(long)]
        threads: Option<usize>,
        /// Candidates hashed per batch
        #[arg(long, default_value_t = CrackOptions::default().chunk_size)]
        chunk_size: usize,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available hash functions and value encodings
    Algorithms,
}

#[derive(Args, Debug)]
struct FormatArgs {
    /// Hash format specification, e.g. "md5($p)" or "sha3_384(md5($s).keccak_512(blake2b_224($p)))"
    format: String,
    /// If needed, specify a salt value: $s
    #[arg(long, value_name = "S", value_parser = utf8_bytes)]
    salt: Option<Bytes>,
    /// If needed, specify a message value: $m
    #[arg(long, value_name = "M", value_parser = utf8_bytes)]
    message: Option<Bytes>,
    /// Log compiler decisions and print the parse tree
    #[arg(long)]
    debug: bool,
}

/// A decoded byte value; wraps `Vec<u8>` so clap treats it as a single argument.
#[derive(Debug, Clone)]
struct Bytes(Vec<u8>);

fn utf8_bytes(s: &str) -> Result<Bytes, DecodeError> {
    encoding::decode(s, Coding::Utf8).map(Bytes)
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Hash { format, password } => {
            init_tracing(format.debug);
            run_hash(&format, &password.0);
        }
        Command::Crack {
            format,
            wordlist,
            hashes,
            threads,
            chunk_size,
            json,
        } => {
            init_tracing(format.debug);
            let options = CrackOptions {
                chunk_size,
                threads,
            };
            run_crack(&format, &wordlist, &hashes, options, json);
        }
        Command::Algorithms => run_algorithms(),
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if debug {
        EnvFilter::new("oddhash=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn compile(format: &FormatArgs) -> Compiled {
    let tree = parsing::parse(&format.format).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "unable to parse hash format specification:\n{}",
            e
        ))
    });
    if format.debug {
        print!("{}", DisplayTree(&tree));
    }

    let mut builder = Compiler::builder();
    if let Some(salt) = &format.salt {
        builder = builder.with_salt(salt.0.clone());
    }
    if let Some(message) = &format.message {
        builder = builder.with_message(message.0.clone());
    }
    let compiled = builder
        .build()
        .compile_tree(&tree)
        .unwrap_or_else(|e| exit_with_error(&format!("unable to compile hash function:\n{}", e)));

    if format.debug {
        if let Compiled::Evaluator(evaluator) = &compiled {
            print!("{}", evaluator.program());
        }
    }
    compiled
}

fn print_digest(digest: &[u8]) {
    match std::str::from_utf8(digest) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("[!] raw hash: {}", hex::encode(digest)),
    }
}

fn run_hash(format: &FormatArgs, password: &[u8]) {
    match compile(format) {
        Compiled::Constant(bytes) => {
            println!("[*] salt only hash");
            print_digest(&bytes);
        }
        Compiled::Evaluator(evaluator) => {
            let digest = evaluator
                .eval(password)
                .unwrap_or_else(|e| exit_with_error(&format!("evaluation failed: {}", e)));
            print_digest(&digest);
        }
    }
}

fn run_crack(
    format: &FormatArgs,
    wordlist: &str,
    hashes: &[String],
    options: CrackOptions,
    json: bool,
) {
    let evaluator = match compile(format) {
        Compiled::Evaluator(evaluator) => evaluator,
        Compiled::Constant(_) => {
            println!("[!] salt only hash, no point continuing");
            return;
        }
    };
    let targets = load_targets(hashes);
    let raw = evaluator.is_raw();

    if !json {
        println!("[*] loading file...");
    }
    let file = File::open(wordlist).unwrap_or_else(|e| {
        exit_with_error(&format!("failed to open wordlist '{}': {}", wordlist, e))
    });
    let candidates = crack::read_wordlist(BufReader::new(file))
        .unwrap_or_else(|e| exit_with_error(&format!("{} ({})", e, wordlist)));

    let start = Instant::now();
    let report = Cracker::new(evaluator, targets, options)
        .run(candidates, |event| {
            if json {
                return;
            }
            match event {
                CrackEvent::Found(found) => {
                    if found.duplicate {
                        println!("[!] same hash found multiple times!!");
                    }
                    println!(
                        "[*] found \x1B[92m{}={}\x1B[39m",
                        latin1(&found.candidate),
                        if raw {
                            hex::encode(&found.digest)
                        } else {
                            String::from_utf8_lossy(&found.digest).into_owned()
                        }
                    );
                }
                CrackEvent::Progress { tried } => {
                    print!("[*] tried {}\r", tried);
                    let _ = io::stdout().flush();
                }
            }
        })
        .unwrap_or_else(|e| exit_with_error(&format!("cracking failed: {}", e)));

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => exit_with_error(&format!("failed to serialize report: {}", e)),
        }
        return;
    }
    if report.all_found() {
        println!("[*] all hashes found, shutdown requested");
    }
    println!(
        "[*] done, tried {} passwords in {:.2?}",
        report.tried,
        start.elapsed()
    );
}

/// Decodes the hash arguments, expanding `@file` into one hash per line.
fn load_targets(hashes: &[String]) -> Targets {
    let mut values = Vec::new();
    for hash in hashes {
        match hash.strip_prefix('@') {
            Some(path) => {
                let content = fs::read_to_string(path).unwrap_or_else(|e| {
                    exit_with_error(&format!("failed to read hashes from '{}': {}", path, e))
                });
                values.extend(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string),
                );
            }
            None => values.push(hash.clone()),
        }
    }

    Targets::new(values.iter().map(|value| {
        encoding::decode(value, Coding::Hex)
            .unwrap_or_else(|e| exit_with_error(&format!("invalid hash: {}", e)))
    }))
}

fn run_algorithms() {
    let registry = AlgorithmRegistry::new();
    println!("hash functions:");
    for name in registry.names() {
        println!("  {}", name);
    }
    println!("value encodings: {}", encoding::codings().join(", "));
}

/// Renders candidate bytes one char per byte, so any wordlist entry prints.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("[E] {}", message);
    std::process::exit(1);
}
