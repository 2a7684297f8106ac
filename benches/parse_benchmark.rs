use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csvtable::{parse, parse_str, CsvWriter};
use tempfile::NamedTempFile;

fn sample_text(rows: usize, quoted: bool) -> String {
    let mut text = String::from("ID,Name,Note\n");
    for i in 0..rows {
        if quoted {
            text.push_str(&format!("{},\"Name, {}\",\"say \"\"hi\"\"\nline two\"\n", i, i));
        } else {
            text.push_str(&format!("{},Name_{},{}\n", i, i, i * 100));
        }
    }
    text
}

fn benchmark_parse_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_str");

    for size in [100, 1000, 10000].iter() {
        let plain = sample_text(*size, false);
        let quoted = sample_text(*size, true);

        group.bench_with_input(BenchmarkId::new("plain", size), &plain, |b, text| {
            b.iter(|| black_box(parse_str(text).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("quoted", size), &quoted, |b, text| {
            b.iter(|| black_box(parse_str(text).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_file");

    for size in [1000, 100000].iter() {
        let temp = NamedTempFile::new().unwrap();
        {
            let mut writer = CsvWriter::create(temp.path()).unwrap();
            writer.write_record(["ID", "Name", "Value"]).unwrap();
            for i in 0..*size {
                writer
                    .write_record([i.to_string(), format!("Name, {}", i), (i * 100).to_string()])
                    .unwrap();
            }
            writer.save().unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(parse(temp.path()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse_str, benchmark_parse_file);
criterion_main!(benches);
