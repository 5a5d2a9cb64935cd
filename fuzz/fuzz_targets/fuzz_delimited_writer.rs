#![no_main]

use libfuzzer_sys::fuzz_target;
use userdata_fixtures::dataset::{Dataset, Record};
use userdata_fixtures::writer::{write_delimited, COMMA, TAB};

fuzz_target!(|data: &[u8]| {
    // First byte picks the delimiter, the rest is split into cells
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let delimiter = if selector & 1 == 0 { COMMA } else { TAB };
    let text = String::from_utf8_lossy(rest);
    let cells: Vec<&str> = text.split('\u{1f}').take(8).collect();

    let mut record = Record::new();
    for (i, cell) in cells.iter().enumerate() {
        record.push(format!(" f{} ", i), *cell);
    }
    let Ok(dataset) = Dataset::from_records(vec![record]) else {
        return;
    };

    let mut out = Vec::new();
    write_delimited(&dataset, &mut out, delimiter).expect("in-memory write cannot fail");
    assert!(out.ends_with(b"\n"));

    // Whatever the cell contents, a conforming reader gets them back verbatim
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(out.as_slice());
    let row = reader
        .records()
        .next()
        .expect("one record")
        .expect("parsable record");
    let got: Vec<&str> = row.iter().collect();
    assert_eq!(got, cells);
});
