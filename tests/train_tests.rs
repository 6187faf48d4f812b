// tests for the offline text classifier trainer

use shadowshield::train::{self, DATASET, MODEL_FILE, TrainConfig, Trainer, VECTORIZER_FILE};

#[test]
fn test_fit_reports_on_held_out_sample() {
    let trained = Trainer::new(TrainConfig::default()).fit(&DATASET).unwrap();

    assert_eq!(trained.report.total, 1);
    let support: usize = trained.report.classes.iter().map(|c| c.support).sum();
    assert_eq!(support, 1);
    assert_eq!(
        trained.model.classes(),
        &["phishing".to_string(), "safe".to_string()]
    );
}

#[test]
fn test_vocabulary_skips_stop_words() {
    let trained = Trainer::new(TrainConfig::default()).fit(&DATASET).unwrap();
    let vocab: Vec<&str> = trained.vectorizer.vocabulary().collect();

    assert!(!vocab.is_empty());
    for stop in ["your", "the", "is", "are", "we"] {
        assert!(!vocab.contains(&stop), "{stop} should be dropped");
    }
}

#[test]
fn test_predicts_a_known_label() {
    let trained = Trainer::new(TrainConfig::default()).fit(&DATASET).unwrap();
    let label = trained.predict("claim your lottery prize");
    assert!(label == "phishing" || label == "safe");
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("models");

    let trained = Trainer::new(TrainConfig::default()).fit(&DATASET).unwrap();
    trained.save(&out).unwrap();

    assert!(out.join(VECTORIZER_FILE).exists());
    assert!(out.join(MODEL_FILE).exists());

    let (vectorizer, model) = train::load(&out).unwrap();
    assert!(vectorizer.vocabulary().eq(trained.vectorizer.vocabulary()));
    assert_eq!(model.classes(), trained.model.classes());

    for (text, _) in DATASET {
        let before = trained.model.predict_proba(&trained.vectorizer.transform(text));
        let after = model.predict_proba(&vectorizer.transform(text));
        assert!((before - after).abs() < 1e-9);
    }
}

#[test]
fn test_load_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(train::load(&dir.path().join("nope")).is_err());
}
