use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chrono::{Duration, Utc};
use parking_facility::{create_facility, ParkingFacility, Vehicle, VehicleClass};
use rand::{thread_rng, Rng};
use std::sync::Arc;
use std::thread;

fn random_vehicle(rng: &mut impl Rng, tag: usize) -> Vehicle {
    let class = VehicleClass::ALL[rng.gen_range(0..VehicleClass::ALL.len())];
    Vehicle::new(format!("BENCH {tag}"), class).unwrap()
}

// Park then immediately exit, so the facility never fills up
fn churn(facility: &ParkingFacility, rounds: usize) {
    let mut rng = thread_rng();
    let entry_time = Utc::now();
    let exit_time = entry_time + Duration::minutes(90);
    for i in 0..rounds {
        if let Ok(ticket) = facility.park_at(random_vehicle(&mut rng, i), entry_time) {
            let receipt = facility.exit(ticket.ticket_id(), exit_time).unwrap();
            black_box(receipt.fare.amount);
        }
    }
}

pub fn park_exit_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("park_exit");

    // Floor count drives how far a scan may have to walk
    for floors in [1u32, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(floors), floors, |b, &floors| {
            let facility = create_facility(floors, 10, 5, 8).unwrap();
            b.iter(|| churn(&facility, 100));
        });
    }

    group.finish();
}

pub fn contended_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_park_exit");

    for threads_count in [2usize, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads_count),
            threads_count,
            |b, &threads_count| {
                let facility = Arc::new(create_facility(3, 10, 5, 8).unwrap());
                b.iter(|| {
                    let handles: Vec<_> = (0..threads_count)
                        .map(|_| {
                            let facility = Arc::clone(&facility);
                            thread::spawn(move || churn(&facility, 250))
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, park_exit_benchmark, contended_benchmark);
criterion_main!(benches);
