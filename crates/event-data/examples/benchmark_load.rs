use event_data::EventStore;
use std::path::Path;
use std::time::Instant;

// Create the input with `hlt-dimuon generate --output data/events.jsonl`.
fn main() {
    let path = Path::new("data/events.jsonl");

    println!("Loading events from {}...\n", path.display());

    let start = Instant::now();
    let store = EventStore::load_from_file(path)
        .expect("Failed to load events");
    let elapsed = start.elapsed();

    let candidates: usize = store
        .events()
        .iter()
        .flat_map(|e| e.tags().into_iter().filter_map(move |t| e.get_by_label(t).ok()))
        .map(|c| c.len())
        .sum();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Events: {}", store.len());
    println!("Candidates: {}", candidates);
    println!("\nPerformance: {:.0} events/second",
             store.len() as f64 / elapsed.as_secs_f64());
}
