//! Inspect command - validate a core dump and list its slots.

use std::path::Path;

use anyhow::{Context, Result};
use mman_dump::{CoreImage, DumpPaths};

/// Run the inspect command.
pub fn run(mem: &Path, vars: &Path, capacity: Option<usize>) -> Result<()> {
    tracing::info!(mem = %mem.display(), vars = %vars.display(), "inspecting core dump");

    let paths = DumpPaths {
        mem: mem.to_path_buf(),
        vars: vars.to_path_buf(),
    };
    let image = CoreImage::open(&paths).context("failed to load core dump")?;
    image.validate(capacity).context("core dump is inconsistent")?;

    let live_bytes: usize = image.slots().iter().map(|s| s.size).sum();
    println!("Core Dump");
    println!("=========");
    println!("Arena:      {} bytes", image.blob().len());
    println!("Live slots: {}", image.slots().len());
    println!("Live bytes: {live_bytes}");
    println!("Hash:       {:016x}", image.hash());
    println!();
    println!("Offset\tSize\tBytes");
    println!("======\t====\t=====");
    for slot in image.slots() {
        let preview = image.region(slot).map(preview).unwrap_or_default();
        println!("{}\t{}\t{preview}", slot.offset, slot.size);
    }
    Ok(())
}

/// First few bytes of a region as hex.
fn preview(bytes: &[u8]) -> String {
    const SHOWN: usize = 8;
    let mut out: Vec<String> = bytes.iter().take(SHOWN).map(|b| format!("{b:02x}")).collect();
    if bytes.len() > SHOWN {
        out.push("..".to_string());
    }
    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_regions() {
        assert_eq!(preview(b"hi\0"), "68 69 00");
        assert_eq!(preview(&[0u8; 12]), "00 00 00 00 00 00 00 00 ..");
    }
}
