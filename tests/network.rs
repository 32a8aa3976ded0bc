use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use backprop_net::{
    from_bytes, load_from_path, save_to_path, to_bytes, train_epoch, ActivationType, NetError,
    Network, NetworkConfig,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("backprop-net-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn seeded(input: usize, layers: Vec<usize>, rate: f64) -> Network {
    Network::new_random(NetworkConfig::new(input, layers).with_rate(rate)).unwrap()
}

#[test]
fn predict_matches_the_golden_value_for_a_3_2_1_network() {
    let n = seeded(3, vec![2, 1], 0.1);
    let got = n.predict(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(got.len(), 1);
    assert_relative_eq!(got[0], 0.6715367136876752, epsilon = 1e-12);
}

#[test]
fn predict_matches_the_golden_value_for_a_4_3_2_1_network() {
    let n = seeded(4, vec![3, 2, 1], 0.1);
    let got = n.predict(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_relative_eq!(got[0], 0.5745518665232722, epsilon = 1e-12);
}

#[test]
fn predict_depends_on_the_seed() {
    let n = Network::new_random(NetworkConfig::new(3, vec![2, 1]).with_seed(7)).unwrap();
    let got = n.predict(&[1.0, 2.0, 3.0]).unwrap();
    assert_relative_eq!(got[0], 0.5047613967779814, epsilon = 1e-12);
}

#[test]
fn predict_is_bit_identical_across_constructions() {
    let a = seeded(3, vec![2, 1], 0.1).predict(&[1.0, 2.0, 3.0]).unwrap();
    let b = seeded(3, vec![2, 1], 0.1).predict(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(a[0].to_bits(), b[0].to_bits());
}

#[test]
fn one_training_record_moves_the_prediction_to_the_golden_value() {
    let mut n = seeded(3, vec![2, 1], 1.0);
    n.train(&[1.0, 2.0, 3.0], &[1.0]).unwrap();
    let got = n.predict(&[1.0, 2.0, 3.0]).unwrap();
    assert_relative_eq!(got[0], 0.7137771408347517, epsilon = 1e-12);
    assert_eq!(n.trained_count(), 1);
}

#[test]
fn one_training_record_on_a_deeper_network() {
    let mut n = seeded(3, vec![2, 2, 1], 1.0);
    n.train(&[1.0, 2.0, 3.0], &[1.0]).unwrap();
    let got = n.predict(&[1.0, 2.0, 3.0]).unwrap();
    assert_relative_eq!(got[0], 0.6525796140632103, epsilon = 1e-12);
}

#[test]
fn tanh_network_predicts_and_trains() {
    let cfg = NetworkConfig::new(3, vec![2, 1])
        .with_activation(ActivationType::Tanh)
        .with_rate(0.5);
    let mut n = Network::new_random(cfg).unwrap();
    assert_relative_eq!(
        n.predict(&[1.0, 2.0, 3.0]).unwrap()[0],
        0.5548508684122001,
        epsilon = 1e-12
    );
    n.train(&[1.0, 2.0, 3.0], &[1.0]).unwrap();
    assert_relative_eq!(
        n.predict(&[1.0, 2.0, 3.0]).unwrap()[0],
        0.831862235417101,
        epsilon = 1e-12
    );
}

#[test]
fn train_increments_only_on_success() {
    let mut n = seeded(3, vec![2, 1], 0.1);
    for len in [0, 2, 4] {
        assert!(n.train(&vec![1.0; len], &[1.0]).is_err());
    }
    assert!(matches!(
        n.train(&[1.0, 2.0, 3.0], &[1.0, 0.0]),
        Err(NetError::TargetSizeMismatch { .. })
    ));
    assert_eq!(n.trained_count(), 0);

    n.train(&[1.0, 2.0, 3.0], &[0.0]).unwrap();
    assert_eq!(n.trained_count(), 1);
}

#[test]
fn target_size_failure_keeps_weights() {
    let mut n = seeded(4, vec![3, 2, 1], 0.1);
    let before = n.weights().to_vec();
    assert!(n.train(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0]).is_err());
    assert_eq!(n.weights(), before.as_slice());
}

#[test]
fn bytes_round_trip_reproduces_predictions_bit_for_bit() {
    let mut n = seeded(3, vec![4, 2], 0.5);
    n.train(&[0.1, 0.2, 0.3], &[1.0, 0.0]).unwrap();
    n.train(&[0.3, 0.2, 0.1], &[0.0, 1.0]).unwrap();

    let restored = from_bytes(&to_bytes(&n).unwrap()).unwrap();
    let input = [0.5, -0.5, 0.25];
    let want = n.predict(&input).unwrap();
    let got = restored.predict(&input).unwrap();
    assert_eq!(
        got.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        want.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
    assert_eq!(restored.config(), n.config());
}

#[test]
fn save_creates_parent_directories_and_load_restores() {
    let dir = scratch_dir("save");
    let path = dir.join("nested").join("model.json");

    let mut n = seeded(2, vec![3, 1], 0.5);
    n.train(&[1.0, 0.0], &[1.0]).unwrap();
    save_to_path(&n, &path).unwrap();

    let loaded = load_from_path(&path).unwrap();
    assert_eq!(loaded, n);
    assert_eq!(loaded.trained_count(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn loading_a_missing_file_is_not_found() {
    let path = scratch_dir("missing").join("nope.json");
    assert!(matches!(load_from_path(&path), Err(NetError::NotFound(p)) if p == path));
}

#[test]
fn loading_garbage_is_a_decode_error() {
    let dir = scratch_dir("garbage");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("model.json");
    fs::write(&path, b"{\"version\": 1, \"config\": ").unwrap();

    assert!(matches!(load_from_path(&path), Err(NetError::Decode(_))));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn saving_under_a_regular_file_is_an_io_error() {
    let dir = scratch_dir("io");
    fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    let path = blocker.join("model.json");

    let n = seeded(2, vec![3, 1], 0.5);
    assert!(matches!(save_to_path(&n, &path), Err(NetError::Io { path: p, .. }) if p == path));
    assert!(matches!(load_from_path(&path), Err(NetError::Io { path: p, .. }) if p == path));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn resumed_training_with_an_awkward_rate_matches_uninterrupted_training() {
    let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    let rate = 0.42769906154674653;

    let mut uninterrupted = seeded(2, vec![3, 1], rate);
    train_epoch(&mut uninterrupted, &inputs, &targets, true).unwrap();
    let mut resumed = from_bytes(&to_bytes(&uninterrupted).unwrap()).unwrap();
    assert_eq!(resumed.config().rate.to_bits(), rate.to_bits());

    train_epoch(&mut uninterrupted, &inputs, &targets, true).unwrap();
    train_epoch(&mut resumed, &inputs, &targets, true).unwrap();
    assert_eq!(resumed, uninterrupted);
}

#[test]
fn resumed_training_continues_the_same_shuffled_sequence() {
    let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    let mut uninterrupted = seeded(2, vec![3, 1], 0.5);
    for _ in 0..3 {
        train_epoch(&mut uninterrupted, &inputs, &targets, true).unwrap();
    }

    let dir = scratch_dir("resume");
    let path = dir.join("model.json");
    let mut first = seeded(2, vec![3, 1], 0.5);
    train_epoch(&mut first, &inputs, &targets, true).unwrap();
    first.save_json(&path).unwrap();

    let mut resumed = Network::load_json(&path).unwrap();
    for _ in 0..2 {
        train_epoch(&mut resumed, &inputs, &targets, true).unwrap();
    }

    assert_eq!(resumed, uninterrupted);
    assert_eq!(resumed.trained_count(), 12);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn online_training_learns_xor() {
    let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    let mut n = seeded(2, vec![4, 1], 0.5);
    let first = train_epoch(&mut n, &inputs, &targets, false).unwrap();
    let mut last = first;
    for _ in 0..3000 {
        last = train_epoch(&mut n, &inputs, &targets, false).unwrap();
    }
    assert!(last < first);
    assert!(last < 0.05, "loss after 3001 epochs: {last}");
}
