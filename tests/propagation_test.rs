use neurotick::cell::Phase;
use neurotick::network::Network;

/// Tick index at which each cell of a network first enters the given phase.
fn first_entry_ticks(mut network: Network, phase: Phase, num_ticks: u64) -> Vec<Option<u64>> {
    let mut firsts: Vec<Option<u64>> = vec![None; network.num_cells()];
    for tick in 0..num_ticks {
        network.tick();
        for (id, p) in network.phases().into_iter().enumerate() {
            if p == phase && firsts[id].is_none() {
                firsts[id] = Some(tick);
            }
        }
    }
    firsts
}

#[test]
fn test_wave_travels_down_the_chain() {
    let mut network = Network::chain(["A", "B", "C"], 1.0, 0.5).unwrap();
    network.stimulate(1).unwrap();

    // The middle cell depolarizes on tick 1; with a propagation delay of
    // ceil(1.0 / 0.5) = 2 ticks, the downstream cell is stimulated once the
    // countdown started at the depolarization tick reaches zero.
    let depolarized = first_entry_ticks(network.clone(), Phase::Depolarized, 30);
    assert_eq!(depolarized[1], Some(1));
    assert_eq!(depolarized[2], Some(3));
    assert_eq!(depolarized[0], None);

    let stimulated = first_entry_ticks(network.clone(), Phase::Stimulated, 30);
    assert_eq!(stimulated[1], Some(0)); // stimulated externally, before the first tick
    assert_eq!(stimulated[2], Some(2));
    assert_eq!(stimulated[0], None);

    // The upstream cell never leaves rest: links are directed.
    for _ in 0..30 {
        network.tick();
        assert_eq!(network.phases()[0], Phase::Resting);
        assert_eq!(network.potentials()[0], -70.0);
    }
}

#[test]
fn test_full_cycle_timeline() {
    let mut network = Network::chain(["A", "B", "C"], 1.0, 0.5).unwrap();
    network.stimulate(1).unwrap();

    let mut timeline = Vec::new();
    for _ in 0..22 {
        network.tick();
        timeline.push(network.phases()[1]);
    }

    // Stimulated on tick 0, depolarized on ticks 1-8, repolarized on ticks 9-17,
    // back at rest from tick 18 on. No phase is skipped.
    assert_eq!(timeline[0], Phase::Stimulated);
    assert!(timeline[1..9].iter().all(|p| *p == Phase::Depolarized));
    assert!(timeline[9..18].iter().all(|p| *p == Phase::Repolarized));
    assert!(timeline[18..].iter().all(|p| *p == Phase::Resting));

    // The downstream cell follows the same cycle two ticks later and is already
    // back at rest as well.
    assert_eq!(network.phases()[2], Phase::Resting);
}

#[test]
fn test_potential_crossings_in_order() {
    let mut network = Network::chain(["A", "B"], 1.0, 0.5).unwrap();
    network.stimulate(0).unwrap();

    // Record the potential of the stimulated cell through a full cycle.
    let mut potentials = Vec::new();
    for _ in 0..25 {
        network.tick();
        potentials.push(network.potentials()[0]);
    }

    let above_threshold = potentials.iter().position(|v| *v > -55.0).unwrap();
    let above_peak = potentials.iter().position(|v| *v > 30.0).unwrap();
    let back_below_rest = potentials
        .iter()
        .enumerate()
        .position(|(i, v)| i > above_peak && *v <= -70.0)
        .unwrap();
    assert!(above_threshold < above_peak);
    assert!(above_peak < back_below_rest);
}

#[test]
fn test_slow_conduction_delays_delivery() {
    // ceil(1.0 / 0.2) = 5 ticks of delay instead of 2.
    let mut network = Network::chain(["A", "B"], 1.0, 0.2).unwrap();
    network.stimulate(0).unwrap();

    let stimulated = first_entry_ticks(network.clone(), Phase::Stimulated, 30);
    assert_eq!(stimulated[1], Some(5));

    // Same dynamics, same depolarization tick for the source; the target
    // depolarizes one tick after its delayed stimulation arrives.
    let depolarized = first_entry_ticks(network, Phase::Depolarized, 30);
    assert_eq!(depolarized[0], Some(1));
    assert_eq!(depolarized[1], Some(6));
}

#[test]
fn test_whole_chain_returns_to_rest() {
    let mut network = Network::chain(["A", "B", "C", "D"], 1.0, 0.5).unwrap();
    network.stimulate(0).unwrap();
    network.run(100);

    assert!(network.phases().iter().all(|p| *p == Phase::Resting));
    for potential in network.potentials() {
        assert_eq!(potential, -70.0);
    }
    for cell in network.cells_iter() {
        assert_eq!(cell.num_pending(), 0);
    }
}

#[test]
fn test_ring_topology_reexcites() {
    // A ring long enough that the wave comes back around after the first cell
    // has returned to rest. Reentrant excitation is legal by design.
    let names: Vec<String> = (0..10).map(|i| format!("N{}", i)).collect();
    let mut network = Network::chain(names, 1.0, 0.5).unwrap();
    let last = network.num_cells() - 1;
    network.add_connection(last, 0, 1.0, 0.5).unwrap();
    network.stimulate(0).unwrap();

    // Count how many times the first cell is re-excited out of rest.
    let mut reexcitations = 0;
    let mut previous = network.phases()[0];
    for _ in 0..60 {
        network.tick();
        let current = network.phases()[0];
        if previous == Phase::Resting && current != Phase::Resting {
            reexcitations += 1;
        }
        previous = current;
    }
    assert!(reexcitations >= 1);
}
