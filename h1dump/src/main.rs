/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, builder::PossibleValuesParser, value_parser};
use clap_complete::Shell;
use log::{debug, info};

use h1parse::{
    HeaderValueType, HttpParseError, HttpParser, MessageCollector, ParserConfig, ParserMode, State,
};

mod args;
mod logger;
mod printer;

use printer::EventPrinter;

const ARG_COMPLETION: &str = "completion";
const ARG_INPUT: &str = "input";
const ARG_MODE: &str = "mode";
const ARG_STRICT: &str = "strict";
const ARG_MAX_HEADER_SIZE: &str = "max-header-size";
const ARG_CONFIG: &str = "config";
const ARG_FEED_SIZE: &str = "feed-size";
const ARG_HEAD_RESPONSE: &str = "head-response";
const ARG_COLLECT: &str = "collect";
const ARG_HEADER_VALUE_TYPE: &str = "header-value-type";
const ARG_VERBOSE: &str = "verbose";

fn build_cli_args() -> Command {
    Command::new("h1dump")
        .about("Feed HTTP/1.x traffic through the parser and dump what it sees")
        .arg(
            Arg::new(ARG_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(ARG_INPUT)
                .help("Captured stream of one connection direction, stdin if absent or '-'")
                .num_args(1)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_MODE)
                .help("Kind of messages in the stream")
                .num_args(1)
                .long(ARG_MODE)
                .short('m')
                .value_parser(PossibleValuesParser::new(["request", "response", "either"]))
                .default_value("either"),
        )
        .arg(
            Arg::new(ARG_STRICT)
                .help("Enable strict grammar checks")
                .action(ArgAction::SetTrue)
                .long(ARG_STRICT),
        )
        .arg(
            Arg::new(ARG_MAX_HEADER_SIZE)
                .help("Max size of the message head, units like K or KiB are allowed")
                .num_args(1)
                .value_name("SIZE")
                .long(ARG_MAX_HEADER_SIZE),
        )
        .arg(
            Arg::new(ARG_CONFIG)
                .help("Load parser config from this yaml file, other options override it")
                .num_args(1)
                .value_name("CONFIG FILE")
                .long(ARG_CONFIG)
                .short('c')
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_FEED_SIZE)
                .help("Bytes passed to the parser per call, 0 to pass all at once")
                .num_args(1)
                .value_name("SIZE")
                .long(ARG_FEED_SIZE)
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new(ARG_HEAD_RESPONSE)
                .help("Responses are for HEAD requests and carry no body")
                .action(ArgAction::SetTrue)
                .long(ARG_HEAD_RESPONSE),
        )
        .arg(
            Arg::new(ARG_COLLECT)
                .help("Print assembled messages instead of parser events")
                .action(ArgAction::SetTrue)
                .long(ARG_COLLECT),
        )
        .arg(
            Arg::new(ARG_HEADER_VALUE_TYPE)
                .help("How repeated headers are kept when collecting")
                .num_args(1)
                .long(ARG_HEADER_VALUE_TYPE)
                .value_parser(PossibleValuesParser::new(["strings", "arrays", "mixed"]))
                .default_value("mixed"),
        )
        .arg(
            Arg::new(ARG_VERBOSE)
                .help("Show verbose message")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v'),
        )
}

fn parser_config(args: &ArgMatches) -> anyhow::Result<ParserConfig> {
    let mut config = match args.get_one::<PathBuf>(ARG_CONFIG) {
        Some(path) => {
            let config = h1parse_yaml::load_parser_config(path)?;
            info!("loaded parser config from {}", path.display());
            config
        }
        None => ParserConfig::default(),
    };
    if args.get_flag(ARG_STRICT) {
        config.set_strict(true);
    }
    if let Some(size) = args::get_usize(args, ARG_MAX_HEADER_SIZE)? {
        if size == 0 {
            return Err(anyhow!("max header size should not be zero"));
        }
        config.set_max_header_size(size);
    }
    Ok(config)
}

fn parser_mode(args: &ArgMatches) -> ParserMode {
    match args.get_one::<String>(ARG_MODE).map(|s| s.as_str()) {
        Some("request") => ParserMode::Request,
        Some("response") => ParserMode::Response,
        _ => ParserMode::Either,
    }
}

fn header_value_type(args: &ArgMatches) -> HeaderValueType {
    match args
        .get_one::<String>(ARG_HEADER_VALUE_TYPE)
        .map(|s| s.as_str())
    {
        Some("strings") => HeaderValueType::Strings,
        Some("arrays") => HeaderValueType::Arrays,
        _ => HeaderValueType::Mixed,
    }
}

/// Feed `data` in pieces of `feed_size` bytes.
///
/// Returns the stream offset of the upgrade payload if the connection has
/// been upgraded.
fn feed_all<F>(
    parser: &mut HttpParser,
    data: &[u8],
    feed_size: usize,
    mut feed: F,
) -> Result<Option<usize>, HttpParseError>
where
    F: FnMut(&mut HttpParser, &[u8]) -> Result<usize, HttpParseError>,
{
    let feed_size = if feed_size == 0 {
        data.len().max(1)
    } else {
        feed_size
    };
    let mut offset = 0;
    for piece in data.chunks(feed_size) {
        let nparsed = feed(parser, piece)?;
        offset += nparsed;
        if parser.state() == State::Upgraded {
            return Ok(Some(offset));
        }
        if nparsed < piece.len() {
            // stopped by the handler
            break;
        }
    }
    Ok(None)
}

fn report_parse_error(e: HttpParseError) -> anyhow::Error {
    let context = e.context().to_string();
    anyhow::Error::new(e).context(format!("parse failed near:\n{context}"))
}

fn main() -> anyhow::Result<()> {
    let args = build_cli_args().get_matches();

    if let Some(target) = args.get_one::<Shell>(ARG_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let verbose_level = args
        .get_one::<u8>(ARG_VERBOSE)
        .copied()
        .unwrap_or_default();
    logger::SyncLogger::new(verbose_level)
        .into_global_logger()
        .context("failed to install logger")?;

    let config = parser_config(&args)?;
    let mode = parser_mode(&args);
    let feed_size = args.get_one::<usize>(ARG_FEED_SIZE).copied().unwrap_or(0);
    let head_response = args.get_flag(ARG_HEAD_RESPONSE);
    debug!("parser mode {mode:?}, {config:?}, feed size {feed_size}");

    let data = args::read_input(&args, ARG_INPUT)?;
    let mut parser = HttpParser::with_config(mode, config);
    let mut stdout = io::stdout().lock();

    let upgrade_offset = if args.get_flag(ARG_COLLECT) {
        let mut collector = MessageCollector::new(header_value_type(&args));
        collector.set_head_response(head_response);
        let r = feed_all(&mut parser, &data, feed_size, |parser, piece| {
            collector.feed(parser, piece)
        })
        .and_then(|upgrade| parser.finish(&mut collector).map(|_| upgrade));
        for msg in collector.take_messages() {
            printer::write_message(&mut stdout, &msg)?;
        }
        r.map_err(report_parse_error)?
    } else {
        let mut printer = EventPrinter::new(&mut stdout, head_response);
        let r = feed_all(&mut parser, &data, feed_size, |parser, piece| {
            parser.execute(&mut printer, piece)
        })
        .and_then(|upgrade| parser.finish(&mut printer).map(|_| upgrade));
        if let Some(e) = printer.take_io_error() {
            return Err(anyhow::Error::new(e).context("failed to write output"));
        }
        r.map_err(report_parse_error)?
    };

    if let Some(offset) = upgrade_offset {
        info!("connection upgraded at stream offset {offset}");
        writeln!(
            stdout,
            "connection upgraded, {} bytes of the new protocol follow",
            data.len() - offset
        )?;
    }
    stdout.flush()?;
    Ok(())
}
