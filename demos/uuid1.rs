//! Simple command that prints one or '-n count' UUIDv1 strings, keeping generator state in the
//! file given by '-s path'. '-x' prints unseparated hex and '-r' accepts a random node identifier
//! on hosts without a usable network interface.

use std::{env, io, io::Write, path::PathBuf, process::ExitCode};

use uuid1::{FileStore, Generator, NodeFallback};

const DEFAULT_STATE_FILE: &str = "uuid_state.json";

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    state_file: Option<PathBuf>,
    hex: bool,
    random_node: bool,
}

fn main() -> io::Result<ExitCode> {
    env_logger::init();

    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-s state-file] [-x] [-r]",
                    program.as_deref().unwrap_or("uuid1")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let store = FileStore::new(
        opts.state_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
    );
    let node_fallback = if opts.random_node {
        NodeFallback::Random
    } else {
        NodeFallback::Abort
    };
    let g = match Generator::builder(store).node_fallback(node_fallback).build() {
        Ok(g) => g,
        Err(err) => {
            eprintln!("Error: could not initialize generator: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count.unwrap_or(1) {
        let (uuid, err) = match g.generate() {
            Ok(uuid) => (uuid, None),
            Err(err) => {
                let (uuid, source) = err.into_parts();
                (uuid, Some(source))
            }
        };
        if opts.hex {
            writeln!(buf, "{:x}", uuid)?;
        } else {
            writeln!(buf, "{}", uuid)?;
        }
        if let Some(err) = err {
            buf.flush()?;
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    }

    buf.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            "-s" => {
                if opts.state_file.is_some() {
                    return Err("option 's' given more than once".to_owned());
                }
                let Some(s_arg) = args.next() else {
                    return Err("argument to option 's' missing".to_owned());
                };
                opts.state_file.replace(PathBuf::from(s_arg));
            }
            "-x" => opts.hex = true,
            "-r" => opts.random_node = true,
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(opts)
}
