use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rusty_iznn::error::IznnError;
use rusty_iznn::gene::{ConnectionGene, NeuronPreset, NodeGene};
use rusty_iznn::genome::{Genome, GenomeConfig};
use rusty_iznn::network::Network;
use rusty_iznn::neuron::Input;
use rusty_iznn::sampler::GenomeSampler;

fn run(network: &mut Network, inputs: &[Vec<f64>], dt: f64) -> Vec<Vec<f64>> {
    inputs
        .iter()
        .map(|values| {
            network.set_inputs(values).unwrap();
            network.advance(dt).unwrap()
        })
        .collect()
}

fn random_inputs<R: Rng>(num_steps: usize, num_inputs: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..num_steps)
        .map(|_| (0..num_inputs).map(|_| rng.gen_range(0.0..20.0)).collect())
        .collect()
}

#[test]
fn test_single_neuron_at_rest() {
    let mut genome = Genome::new();
    genome.add_node(0, NodeGene::new(0.0, 0.02, 0.20, -65.0, 8.00));
    let config = GenomeConfig::new(vec![], vec![0], 1.0);

    let mut network = Network::create(&genome, &config).unwrap();
    let outputs = network.advance(0.05).unwrap();

    let neuron = network.neuron(0).unwrap();
    assert_eq!(outputs, vec![0.0]);
    assert_abs_diff_eq!(neuron.v(), -65.1496, epsilon = 1e-4);
    assert_abs_diff_eq!(neuron.u(), -13.00003, epsilon = 1e-5);
}

#[test]
fn test_pruning_disabled_input() {
    let mut genome = Genome::new();
    genome.add_node(0, NodeGene::from_preset(0.0, NeuronPreset::RegularSpiking));
    genome.add_connection(ConnectionGene::new(-1, 0, 1.0, true));
    genome.add_connection(ConnectionGene::new(-2, 0, 1.0, false));
    let config = GenomeConfig::new(vec![-1, -2], vec![0], 1.0);

    let network = Network::create(&genome, &config).unwrap();
    assert_eq!(network.num_neurons(), 1);
    assert_eq!(network.neuron(0).unwrap().inputs(), &[Input::new(-1, 1.0)]);
}

#[test]
fn test_recurrent_sources_lag_one_step() {
    // 0 and 1 excite each other, only 0 is driven by the input
    let mut genome = Genome::new();
    genome.add_node(0, NodeGene::from_preset(0.0, NeuronPreset::RegularSpiking));
    genome.add_node(1, NodeGene::from_preset(0.0, NeuronPreset::RegularSpiking));
    genome.add_connection(ConnectionGene::new(-1, 0, 1.0, true));
    genome.add_connection(ConnectionGene::new(1, 0, 10_000.0, true));
    genome.add_connection(ConnectionGene::new(0, 1, 10_000.0, true));
    let config = GenomeConfig::new(vec![-1], vec![0, 1], 1.0);

    let mut network = Network::create(&genome, &config).unwrap();
    network.set_inputs(&[10_000.0]).unwrap();
    assert_eq!(network.advance(0.05).unwrap(), vec![1.0, 0.0]);
    assert_eq!(network.advance(0.05).unwrap(), vec![1.0, 1.0]);

    network.set_inputs(&[0.0]).unwrap();
    assert_eq!(network.advance(0.05).unwrap(), vec![1.0, 1.0]);
}

#[test]
fn test_invalid_input_count() {
    let sampler = GenomeSampler::new(3, 1, 2, 10, (-1.0, 1.0), NeuronPreset::RegularSpiking).unwrap();
    let genome = sampler.sample(&mut StdRng::seed_from_u64(0));
    let mut network = Network::create(&genome, &sampler.config(1.0)).unwrap();

    network.set_inputs(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(
        network.set_inputs(&[4.0, 5.0]),
        Err(IznnError::InputCountMismatch {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(network.input_value(-1), Some(1.0));
    assert_eq!(network.input_value(-2), Some(2.0));
    assert_eq!(network.input_value(-3), Some(3.0));
}

#[test]
fn test_determinism() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let sampler = GenomeSampler::new(4, 3, 12, 80, (-20.0, 20.0), NeuronPreset::RegularSpiking)
        .unwrap()
        .with_bias((0.0, 5.0))
        .unwrap()
        .with_param_noise(0.05)
        .unwrap()
        .with_enabled_rate(0.8)
        .unwrap();
    let config = sampler.config(0.5);

    for _ in 0..5 {
        let genome = sampler.sample(&mut rng);
        let inputs = random_inputs(1_000, 4, &mut rng);

        let mut n1 = Network::create(&genome, &config).unwrap();
        let mut n2 = Network::create(&genome.clone(), &config).unwrap();
        let o1 = run(&mut n1, &inputs, 0.05);
        let o2 = run(&mut n2, &inputs, 0.05);
        assert_eq!(o1, o2);
        assert_eq!(n1, n2);

        // a reset network replays the same outputs
        n1.reset();
        assert_eq!(run(&mut n1, &inputs, 0.05), o1);
    }
}

#[test]
fn test_unstable_networks_do_not_fail() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let sampler = GenomeSampler::new(2, 2, 6, 40, (-1e6, 1e6), NeuronPreset::Chattering)
        .unwrap()
        .with_bias((-1e3, 1e3))
        .unwrap()
        .with_param_noise(0.5)
        .unwrap();
    let config = sampler.config(0.5);

    for _ in 0..10 {
        let genome = sampler.sample(&mut rng);
        let mut network = Network::create(&genome, &config).unwrap();
        let inputs = random_inputs(500, 2, &mut rng)
            .into_iter()
            .map(|values| values.into_iter().map(|v| v * 1e200).collect())
            .collect::<Vec<Vec<f64>>>();

        for outputs in run(&mut network, &inputs, 0.05) {
            assert!(outputs.iter().all(|&o| o == 0.0 || o == 1.0));
        }
        for (_, neuron) in network.neurons_iter() {
            assert!(neuron.v().is_finite());
            assert!(neuron.u().is_finite());
        }
    }
}

#[test]
fn test_genome_file_to_network() {
    let dir = tempfile::tempdir().unwrap();
    let sampler = GenomeSampler::new(2, 2, 3, 15, (-10.0, 10.0), NeuronPreset::FastSpiking).unwrap();
    let genome = sampler.sample(&mut StdRng::seed_from_u64(5));
    let config = sampler.config(0.5);

    genome.save_to(dir.path().join("genome.json")).unwrap();
    config.save_to(dir.path().join("config.json")).unwrap();
    let loaded_genome = Genome::load_from(dir.path().join("genome.json")).unwrap();
    let loaded_config = GenomeConfig::load_from(dir.path().join("config.json")).unwrap();

    let network = Network::create(&loaded_genome, &loaded_config).unwrap();
    assert_eq!(network.output_keys(), &[0, 1]);
    assert_eq!(network.input_keys(), &[-1, -2]);
}
