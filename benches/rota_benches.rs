use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rota_libs::heatmap::HeatMap;
use rota_libs::submission::SubmissionRecord;
use rota_libs::time::{Cell, Compress, Day, SLOTS_PER_DAY};

fn compress_and_aggregate(c: &mut Criterion) {
    c.bench_function("compress_full_week", |b| {
        // Every other slot selected across all five days: worst case for
        // the run scanner, one range per selected cell.
        let cells: Vec<Cell> = Day::ALL
            .into_iter()
            .flat_map(|day| {
                (0..SLOTS_PER_DAY)
                    .step_by(2)
                    .map(move |slot| Cell::new(day, slot))
            })
            .collect();

        b.iter(|| black_box(cells.iter().compress()));
    });

    c.bench_function("aggregate_week", |b| {
        let week = chrono::NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let records: Vec<SubmissionRecord> = (0..200)
            .map(|i| SubmissionRecord {
                submitter_id: format!("volunteer-{i}"),
                submitter_name: format!("Volunteer {i}"),
                week_start: week,
                times_per_week: 1 + i % 4,
                willing_to_drive: i % 3 == 0,
                ranges: vec![
                    "Monday 9:00-12:00".to_string(),
                    "Wednesday 14:00-15:00".to_string(),
                    "Friday 18:30-21:30".to_string(),
                ],
            })
            .collect();

        b.iter(|| black_box(HeatMap::from_submissions(&records)));
    });
}

criterion_group!(benches, compress_and_aggregate);
criterion_main!(benches);
