use std::fs;
use std::io;
use std::path::Path;

/// Writes one CSV either into the output directory or to stdout.
pub fn write_csv(dir: Option<&Path>, filename: &str, headers: &[&str], rows: &[Vec<String>]) {
    match dir {
        Some(dir) => {
            fs::create_dir_all(dir).expect("failed to create output directory");
            let file = fs::File::create(dir.join(filename)).expect("failed to create output file");
            write_records(csv::Writer::from_writer(file), headers, rows);
        }
        None => write_records(csv::Writer::from_writer(io::stdout()), headers, rows),
    }
}

fn write_records<W: io::Write>(mut wtr: csv::Writer<W>, headers: &[&str], rows: &[Vec<String>]) {
    wtr.write_record(headers).expect("failed to write csv header");
    for row in rows {
        wtr.write_record(row).expect("failed to write csv row");
    }
    wtr.flush().expect("failed to flush csv output");
}
