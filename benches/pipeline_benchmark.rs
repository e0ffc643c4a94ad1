use bikeshare_explorer::analyzers::RentalAnalyzer;
use bikeshare_explorer::models::{HourlyRecord, Season, WeatherSituation};
use bikeshare_explorer::processors::{filter, LabelEnricher, Selection, SelectionDomain};
use bikeshare_explorer::readers::TableReader;
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write;

// Synthetic hourly table cycling through every season, weather code and hour
fn create_hourly_records(days: usize) -> Vec<HourlyRecord> {
    let base_date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
    let mut records = Vec::with_capacity(days * 24);

    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        let season = Season::ALL[(day / 91) % 4];
        for hour in 0..24u8 {
            let weather = WeatherSituation::ALL[(day + hour as usize) % 4];
            let count = ((hour as u32 * 37 + day as u32 * 11) % 900) + 1;
            records.push(
                HourlyRecord::new(date, hour, season, weather, count).with_conditions(0.5, 0.6),
            );
        }
    }

    records
}

fn create_hourly_csv(days: usize) -> String {
    let mut csv = String::from("dteday,season,hr,weathersit,temp,hum,cnt\n");
    for record in create_hourly_records(days) {
        let _ = writeln!(
            csv,
            "{},{},{},{},0.5,0.6,{}",
            record.date,
            record.season_code(),
            record.hour,
            record.weather_code(),
            record.rental_count
        );
    }
    csv
}

fn benchmark_csv_parsing(c: &mut Criterion) {
    let csv = create_hourly_csv(365);
    let reader = TableReader::new();

    c.bench_function("read_hourly_csv", |b| {
        b.iter(|| {
            let rows = reader.read_hourly(csv.as_bytes(), "hour.csv").unwrap();
            black_box(rows.len())
        })
    });
}

fn benchmark_label_enrichment(c: &mut Criterion) {
    let csv = create_hourly_csv(365);
    let raw = TableReader::new().read_hourly(csv.as_bytes(), "hour.csv").unwrap();
    let enricher = LabelEnricher::new();

    c.bench_function("label_enrichment", |b| {
        b.iter(|| {
            let enrichment = enricher.enrich(raw.clone()).unwrap();
            black_box(enrichment.records.len())
        })
    });
}

fn benchmark_filter(c: &mut Criterion) {
    let records = create_hourly_records(730);
    let domain = SelectionDomain::from_records(&records);
    let selection = Selection::parse(&[1, 2], &["Summer".to_string()], &domain).unwrap();

    c.bench_function("filter_weather_season", |b| {
        b.iter(|| black_box(filter(&records, &selection).len()))
    });
}

fn benchmark_aggregates_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates_by_size");
    let analyzer = RentalAnalyzer::new();

    for &days in &[30, 365, 730] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            let records = create_hourly_records(days);
            let selection = Selection::all(&SelectionDomain::from_records(&records));

            b.iter(|| {
                let view = filter(&records, &selection);
                black_box(analyzer.analyze(&view))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_csv_parsing,
    benchmark_label_enrichment,
    benchmark_filter,
    benchmark_aggregates_by_size
);
criterion_main!(benches);
