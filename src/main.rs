//! Board script runner (default binary).
//!
//! Replays a line-delimited JSON command script against one board and prints a response
//! per command. Reads stdin when no script path is given.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command};

use tetris_board::adapter::{decode_line, encode_response, Session};
use tetris_board::core::Board;
use tetris_board::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

#[derive(Debug, Clone)]
struct Config {
    script: Option<PathBuf>,
    width: usize,
    height: usize,
    render: bool,
    sanity_checks: bool,
}

fn parse_args() -> Result<Config> {
    let matches = Command::new("tetris-board")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replay a JSON command script against a piece-placement board")
        .arg(
            Arg::new("SCRIPT")
                .help("Command script, one JSON object per line (stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("WIDTH")
                .long("width")
                .takes_value(true)
                .value_name("COLUMNS"),
        )
        .arg(
            Arg::new("HEIGHT")
                .long("height")
                .takes_value(true)
                .value_name("ROWS"),
        )
        .arg(
            Arg::new("RENDER")
                .long("render")
                .help("Print the board after every mutating command"),
        )
        .arg(
            Arg::new("NO_SANITY_CHECKS")
                .long("no-sanity-checks")
                .help("Skip cache consistency checks after each mutation"),
        )
        .get_matches();

    let width = match matches.value_of("WIDTH") {
        Some(w) => w.parse().with_context(|| format!("invalid --width {w:?}"))?,
        None => DEFAULT_BOARD_WIDTH,
    };
    let height = match matches.value_of("HEIGHT") {
        Some(h) => h.parse().with_context(|| format!("invalid --height {h:?}"))?,
        None => DEFAULT_BOARD_HEIGHT,
    };
    anyhow::ensure!(width > 0 && height > 0, "board dimensions must be non-zero");

    Ok(Config {
        script: matches.value_of_os("SCRIPT").map(PathBuf::from),
        width,
        height,
        render: matches.is_present("RENDER"),
        sanity_checks: !matches.is_present("NO_SANITY_CHECKS"),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let config = parse_args()?;
    log::info!(
        "replaying on a {}x{} board (sanity checks {})",
        config.width,
        config.height,
        if config.sanity_checks { "on" } else { "off" }
    );

    let input: Box<dyn BufRead> = match &config.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let board = Board::new(config.width, config.height).with_sanity_checks(config.sanity_checks);
    let mut session = Session::new(board);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (lineno, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", lineno + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (resp, mutating) = match decode_line(line) {
            Ok(cmd) => {
                let mutating = cmd.is_mutating();
                (session.handle(cmd), mutating)
            }
            Err(resp) => (resp, false),
        };
        if resp.is_error() {
            log::warn!("line {}: command rejected", lineno + 1);
        }
        writeln!(out, "{}", encode_response(&resp)?)?;

        if config.render && mutating && !resp.is_error() {
            writeln!(out, "{}", session.board())?;
        }
    }

    Ok(())
}
