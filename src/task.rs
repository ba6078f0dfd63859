use crate::{
    codec::{decode, deserialize, serialize},
    config::Options,
    error::Result,
    graph::{compact, read_edges, CompactedGraph, GraphInfo, WeightMap},
    memory_manager::MemoryManager,
};
use log::info;
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
    time::Instant,
};

/// Reads a text edge list and compacts it.
pub fn build_graph<R: BufRead>(input: R, options: &Options) -> Result<(CompactedGraph, WeightMap)> {
    let (adjacency, weights) = read_edges(input, options.get_parse_mode())?;
    Ok((compact(adjacency, options.get_tie_break()), weights))
}

/// Reads a text edge list, compacts it and encodes it into `mm`.
pub fn serialize_text<R: BufRead>(
    input: R,
    mm: &mut MemoryManager,
    options: &Options,
) -> Result<usize> {
    let (graph, weights) = build_graph(input, options)?;
    serialize(mm, &graph, &weights, options.get_header_mode())
}

/// The output file is only created once the input has been parsed.
pub fn serialize_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &Options,
) -> Result<usize> {
    let time_start = Instant::now();
    let input = BufReader::new(File::open(input)?);
    let (graph, weights) = build_graph(input, options)?;
    let mut mm = MemoryManager::new_mmap_mut(output, 0)?;
    let len = serialize(&mut mm, &graph, &weights, options.get_header_mode())?;
    info!("serialize_time: {}", time_start.elapsed().as_millis());
    Ok(len)
}

pub fn deserialize_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &Options,
) -> Result<usize> {
    let time_start = Instant::now();
    let mm = MemoryManager::new_mmap(input)?;
    let mut output = BufWriter::new(File::create(output)?);
    let num_lines = deserialize(&mm, &mut output, options)?;
    output.flush()?;
    info!("deserialize_time: {}", time_start.elapsed().as_millis());
    Ok(num_lines)
}

pub fn inspect_file<P: AsRef<Path>>(input: P, options: &Options) -> Result<GraphInfo> {
    Ok(decode(MemoryManager::new_mmap(input)?.as_bytes(), options)?.info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{HeaderMode, ParseMode},
        error::Err,
    };

    #[test]
    fn test_serialize_text() {
        let mut mm = MemoryManager::new_mem(0);
        let options = Options::new()
            .header_mode(HeaderMode::Legacy)
            .tolerate_legacy_header(true);
        let len = serialize_text(&b"1\t2\t5\n2\t3\t7\n1\t3\t9"[..], &mut mm, &options).unwrap();
        assert_eq!(len, 8 + 2 * 8 + 3 * 5);
        let mut output = Vec::new();
        deserialize(&mm, &mut output, &options).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "1 2 5\n1 3 9\n2 3 7");
    }

    #[test]
    fn test_serialize_text_strict() {
        let mut mm = MemoryManager::new_mem(0);
        let options = Options::new().parse_mode(ParseMode::Strict);
        assert!(serialize_text(&b"1\t2\n"[..], &mut mm, &options).is_err());
    }

    #[test]
    fn test_serialize_file_keeps_output_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("edges.txt");
        let output = dir.path().join("graph.bin");
        std::fs::write(&input, "1\t2\t5\n2\tx\t7\n").unwrap();
        let options = Options::new().parse_mode(ParseMode::Strict);
        assert!(matches!(
            serialize_file(&input, &output, &options),
            Err(Err::MalformedInput(_))
        ));
        assert!(!output.exists());

        std::fs::write(&output, b"previous").unwrap();
        assert!(serialize_file(&input, &output, &options).is_err());
        assert_eq!(std::fs::read(&output).unwrap(), b"previous");
    }
}
