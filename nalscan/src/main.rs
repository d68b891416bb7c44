use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use segment::{MappedStream, NalCursor, NalUnitType, ScanMode};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Annex B if the file starts with a start code, 4-byte length prefixes otherwise
    Auto,
    Annexb,
    Length,
}

/// Lists the NAL units of an H.264 elementary stream.
#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long)]
    file_path: String,

    #[arg(short, long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Width in bytes of each length field, for `--mode length`
    #[arg(short = 'w', long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=4))]
    length_width: u8,

    /// Also print the payload size of each unit
    #[arg(short, long)]
    payload: bool,
}

fn scan_mode(mode: Mode, length_width: u8, data: &[u8]) -> ScanMode {
    match mode {
        Mode::Auto => ScanMode::detect(data),
        Mode::Annexb => ScanMode::AnnexB,
        Mode::Length => ScanMode::LengthPrefixed(length_width),
    }
}

fn list_units(
    cursor: NalCursor<'_>,
    show_payload: bool,
    out: &mut impl Write,
) -> Result<BTreeMap<NalUnitType, usize>> {
    let mut counts = BTreeMap::new();

    for (index, located) in cursor.payloads().enumerate() {
        let (unit, payload) = located.with_context(|| format!("reading nal unit {index}"))?;
        let header = unit.header;

        write!(
            out,
            "{index:>6} start={:<10} data={:<10} f={} nri={} type={:>2} ({})",
            unit.start_offset,
            unit.data_offset,
            header.forbidden_zero_bit,
            header.nal_ref_idc,
            header.nal_unit_type,
            header.unit_type(),
        )?;
        if show_payload {
            write!(out, " size={}", payload.len())?;
        }
        writeln!(out)?;

        *counts.entry(header.unit_type()).or_insert(0) += 1;
    }

    Ok(counts)
}

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        file_path,
        mode,
        length_width,
        payload,
    } = Args::parse();

    let stream = MappedStream::from_file_path(&file_path)
        .with_context(|| format!("unable to map {file_path}"))?;
    let mode = scan_mode(mode, length_width, stream.as_bytes());
    log::info!("scanning {} bytes of {file_path} as {mode:?}", stream.as_bytes().len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let counts = list_units(stream.cursor(mode)?, payload, &mut out)?;

    writeln!(out)?;
    for (unit_type, count) in &counts {
        writeln!(out, "{unit_type:<16} {count}")?;
    }
    writeln!(out, "{:<16} {}", "total", counts.values().sum::<usize>())?;

    Ok(())
}
