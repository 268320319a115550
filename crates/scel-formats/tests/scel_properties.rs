#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! End-to-end tests for written cell dictionaries
//!
//! Dictionaries are written to real files through `SeekSink` and to memory,
//! then read back to check totals, example words and the stored checksum.

use pretty_assertions::assert_eq;
use scel_formats::header::{CHECKSUM_OFFSET, CHECKSUM_REGION_OFFSET};
use scel_formats::{
    BufferedSink, Checksum, LineSource, ScelError, ScelOptions, ScelWriter, SeekSink,
    SyllableTable, parse_line, read_entries, read_header, verify,
};
use std::fs::File;
use std::io::{Cursor, Seek, SeekFrom};

const WORD_LIST: &str = "\
ni'hao 你好 note
onlyonefield
'zai'jian 再见
zhong'guo'ren 中国人
xie'xie 谢谢
dui'bu'qi 对不起
mei'guan'xi 没关系
qing'wen 请问
ming'tian 明天
";

fn fixed_options(title: &str) -> ScelOptions {
    ScelOptions::new(title)
        .with_session_id("L12345")
        .with_timestamp(1_700_000_000)
}

fn write_to_vec(text: &str, options: ScelOptions) -> scel_formats::Result<Vec<u8>> {
    let table = SyllableTable::builtin()?;
    let mut writer = ScelWriter::new(Vec::<u8>::new(), &table, options)?;
    for line in text.lines() {
        writer.push_line(line)?;
    }
    Ok(writer.finish()?.0)
}

#[test]
fn totals_match_valid_lines() {
    let bytes = write_to_vec(WORD_LIST, fixed_options("totals")).expect("Write should succeed");
    let (_, summary) = read_header(&mut Cursor::new(&bytes)).expect("Header should parse");

    let parsed: Vec<_> = WORD_LIST.lines().filter_map(parse_line).collect();
    assert_eq!(parsed.len(), 8);
    assert_eq!(summary.code_count, 8);
    assert_eq!(summary.word_count, 8);

    let code_bytes: usize = parsed.iter().map(|p| 2 + 2 * p.syllables.len()).sum();
    let word_bytes: usize = parsed
        .iter()
        .map(|p| 2 + 2 * p.word.encode_utf16().count())
        .sum();
    assert_eq!(summary.code_bytes as usize, code_bytes);
    assert_eq!(summary.word_bytes as usize, word_bytes);

    // Records account for every byte after the syllable table
    let table = SyllableTable::builtin().expect("Operation should succeed");
    let content = bytes.len() - CHECKSUM_REGION_OFFSET as usize - table.as_bytes().len();
    assert_eq!(content, code_bytes + word_bytes + parsed.len() * (2 + 12));
}

#[test]
fn example_words_are_first_six() {
    let bytes = write_to_vec(WORD_LIST, fixed_options("examples")).expect("Write should succeed");
    let summary = verify(&mut Cursor::new(&bytes)).expect("Verification should succeed");
    assert_eq!(
        summary.examples.as_str(),
        "你好   再见   中国人   谢谢   对不起   没关系"
    );
    assert_eq!(summary.title.as_str(), "examples");
    assert_eq!(summary.category.as_str(), "本地");
    assert_eq!(summary.description.as_str(), "由 scel-maker 生成的细胞词库");
}

#[test]
fn stored_checksum_matches_region() {
    let bytes = write_to_vec(WORD_LIST, fixed_options("checksum")).expect("Write should succeed");

    let mut cursor = Cursor::new(&bytes);
    cursor
        .seek(SeekFrom::Start(CHECKSUM_REGION_OFFSET))
        .expect("Seek should succeed");
    let recomputed = Checksum::compute(&mut cursor).expect("Hashing should succeed");

    let offset = CHECKSUM_OFFSET as usize;
    assert_eq!(&bytes[offset..offset + 16], &recomputed.to_bytes());
    assert_ne!(recomputed, Checksum::default());
}

#[test]
fn output_is_deterministic_apart_from_session_and_time() {
    let first = write_to_vec(WORD_LIST, ScelOptions::new("same")).expect("Write should succeed");
    let second = write_to_vec(WORD_LIST, ScelOptions::new("same").with_timestamp(7))
        .expect("Write should succeed");
    assert_eq!(first.len(), second.len());

    let session = 0x1C..0x11C;
    let timestamp = 0x11C..0x120;
    for (offset, (a, b)) in first.iter().zip(&second).enumerate() {
        if session.contains(&offset) || timestamp.contains(&offset) {
            continue;
        }
        assert_eq!(a, b, "files differ at {offset:#x}");
    }

    let fixed_a = write_to_vec(WORD_LIST, fixed_options("same")).expect("Write should succeed");
    let fixed_b = write_to_vec(WORD_LIST, fixed_options("same")).expect("Write should succeed");
    assert_eq!(fixed_a, fixed_b);
}

#[test]
fn unknown_syllable_is_fatal() {
    // Legacy behavior wrote index 0 for unknown syllables; this must fail instead
    let result = write_to_vec("ni'hao 你好\nni3'qwx3 你好\n", fixed_options("bad"));
    match result {
        Err(ScelError::UnknownSyllable { syllable, line }) => {
            assert_eq!(syllable, "qwx3");
            assert_eq!(line, 2);
        }
        other => panic!("expected UnknownSyllable, got {other:?}"),
    }
}

#[test]
fn toned_codes_match_toneless_codes() {
    let toned = write_to_vec("ni3'hao3 你好 note\n'zai4'jian4 再见\n", fixed_options("tones"))
        .expect("Write should succeed");
    let toneless = write_to_vec("ni'hao 你好\nzai'jian 再见\n", fixed_options("tones"))
        .expect("Write should succeed");
    assert_eq!(toned, toneless);

    let entries = read_entries(&mut Cursor::new(&toned)).expect("Entries should parse");
    assert_eq!(entries[0].syllables, ["ni", "hao"]);
    assert_eq!(entries[0].words, ["你好"]);
}

#[test]
fn file_sink_matches_memory_sink() {
    let table = SyllableTable::builtin().expect("Operation should succeed");
    let memory = write_to_vec(WORD_LIST, fixed_options("sink")).expect("Write should succeed");

    let dir = tempfile::tempdir().expect("Temp dir should be created");
    let path = dir.path().join("sink.scel");
    let file = File::create(&path).expect("File should be created");
    let mut writer = ScelWriter::new(SeekSink::new(file), &table, fixed_options("sink"))
        .expect("Writer should start");
    for line in LineSource::new(WORD_LIST.as_bytes()).expect("Source should open") {
        writer
            .push_line(&line.expect("Line should decode"))
            .expect("Line should be written");
    }
    let (_, report) = writer.finish().expect("Finish should succeed");

    let on_disk = std::fs::read(&path).expect("File should be readable");
    assert_eq!(on_disk, memory);
    assert_eq!(report.file_size, on_disk.len() as u64);
    assert_eq!(report.lines_read, 9);
    assert_eq!(report.lines_skipped, 1);

    let mut file = File::open(&path).expect("File should open");
    verify(&mut file).expect("Verification should succeed");
}

#[test]
fn buffered_sink_matches_memory_sink() {
    let table = SyllableTable::builtin().expect("Operation should succeed");
    let memory = write_to_vec(WORD_LIST, fixed_options("sink")).expect("Write should succeed");

    let mut writer = ScelWriter::new(BufferedSink::new(Vec::<u8>::new()), &table, fixed_options("sink"))
        .expect("Writer should start");
    for line in WORD_LIST.lines() {
        writer.push_line(line).expect("Line should be written");
    }
    let (flushed, _) = writer.finish().expect("Finish should succeed");
    assert_eq!(flushed, memory);
}

#[test]
fn entries_read_back_in_order() {
    let bytes = write_to_vec(WORD_LIST, fixed_options("entries")).expect("Write should succeed");
    let entries = read_entries(&mut Cursor::new(&bytes)).expect("Entries should parse");
    let words: Vec<_> = entries.iter().flat_map(|e| e.words.clone()).collect();
    assert_eq!(
        words,
        ["你好", "再见", "中国人", "谢谢", "对不起", "没关系", "请问", "明天"]
    );
    assert_eq!(entries[2].syllables, ["zhong", "guo", "ren"]);
}
