use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::debug;

use super::commands::{SearchCommand, SearchCompletion, SeedQuery};
use crate::dataset::Dataset;
use crate::types::{LatLon, ResultTarget, distance_between};

/// Launches the background search worker thread and returns its channels.
///
/// `reference` is the position results are ranked around; without one the
/// worker falls back to name order. `delay` simulates engine latency so the
/// loading state is observable in the demo host.
pub fn spawn(
    dataset: Dataset,
    reference: Option<LatLon>,
    delay: Duration,
) -> (Sender<SearchCommand>, Receiver<SearchCompletion>) {
    let (command_tx, command_rx) = mpsc::channel();
    let (completion_tx, completion_rx) = mpsc::channel();

    thread::spawn(move || worker_loop(&dataset, reference, delay, command_rx, completion_tx));

    (command_tx, completion_rx)
}

fn worker_loop(
    dataset: &Dataset,
    reference: Option<LatLon>,
    delay: Duration,
    command_rx: Receiver<SearchCommand>,
    completion_tx: Sender<SearchCompletion>,
) {
    while let Ok(command) = command_rx.recv() {
        if !handle_command(dataset, reference, delay, &completion_tx, command) {
            break;
        }
    }
}

fn handle_command(
    dataset: &Dataset,
    reference: Option<LatLon>,
    delay: Duration,
    completion_tx: &Sender<SearchCompletion>,
    command: SearchCommand,
) -> bool {
    match command {
        SearchCommand::Seed(seed) => {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            completion_tx
                .send(run_round(dataset, reference, &seed))
                .is_ok()
        }
        SearchCommand::Shutdown => false,
    }
}

fn run_round(dataset: &Dataset, reference: Option<LatLon>, seed: &SeedQuery) -> SearchCompletion {
    // Only category stubs establish query context; a concrete POI cannot.
    let category = match &seed.item.target {
        ResultTarget::Category(id) => id,
        ResultTarget::Poi { .. } => {
            return SearchCompletion::empty(seed.id, seed.item.name.to_lowercase());
        }
    };

    let mut records: Vec<_> = dataset.pois_in(category).collect();
    match reference {
        Some(reference) => records.sort_by(|a, b| {
            distance_between(reference, a.location())
                .total_cmp(&distance_between(reference, b.location()))
        }),
        None => records.sort_by(|a, b| a.name.cmp(&b.name)),
    }

    let phrase = seed.item.name.to_lowercase();
    let results: Vec<_> = records.iter().map(|record| record.to_result()).collect();
    debug!(
        "round {} (priority {}) resolved {} results for '{phrase}'",
        seed.id,
        seed.priority,
        results.len()
    );

    if results.is_empty() {
        SearchCompletion::empty(seed.id, phrase)
    } else {
        SearchCompletion::new(seed.id, phrase, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, CategoryId, ResultItem};

    fn seed_for(id: u64, category: &Category) -> SearchCommand {
        SearchCommand::Seed(SeedQuery::new(id, ResultItem::category_seed(category)))
    }

    #[test]
    fn shutdown_command_stops_worker() {
        let (tx, _rx) = spawn(Dataset::default(), None, Duration::ZERO);
        tx.send(SearchCommand::Shutdown).unwrap();
    }

    #[test]
    fn seeded_round_returns_category_results_nearest_first() {
        let dataset = Dataset::sample();
        let reference = LatLon::new(52.5200, 13.4050);
        let (tx, rx) = spawn(dataset.clone(), Some(reference), Duration::ZERO);

        let category = Category::new("restaurants", "Restaurants", "restaurants");
        tx.send(seed_for(1, &category)).expect("send seed");

        let completion = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("receive completion");
        assert_eq!(completion.query_id, 1);
        assert_eq!(completion.phrase, "restaurants");
        assert_eq!(
            completion.result_count,
            dataset.pois_in(&CategoryId::new("restaurants")).count()
        );

        let results = completion.results.expect("results");
        for pair in results.windows(2) {
            let near = distance_between(reference, pair[0].location().expect("location"));
            let far = distance_between(reference, pair[1].location().expect("location"));
            assert!(near <= far, "results not ranked by distance");
        }

        tx.send(SearchCommand::Shutdown).expect("send shutdown");
    }

    #[test]
    fn unknown_category_rounds_complete_empty() {
        let (tx, rx) = spawn(Dataset::sample(), None, Duration::ZERO);
        let category = Category::new("marinas", "Marinas", "marinas");
        tx.send(seed_for(7, &category)).expect("send seed");

        let completion = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("receive completion");
        assert_eq!(completion.query_id, 7);
        assert_eq!(completion.result_count, 0);
        assert!(completion.results.is_none());

        tx.send(SearchCommand::Shutdown).expect("send shutdown");
    }

    #[test]
    fn without_a_reference_results_fall_back_to_name_order() {
        let (tx, rx) = spawn(Dataset::sample(), None, Duration::ZERO);
        let category = Category::new("cafes", "Cafes", "cafes");
        tx.send(seed_for(1, &category)).expect("send seed");

        let completion = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("receive completion");
        let names: Vec<_> = completion
            .results
            .expect("results")
            .into_iter()
            .map(|item| item.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        tx.send(SearchCommand::Shutdown).expect("send shutdown");
    }
}
