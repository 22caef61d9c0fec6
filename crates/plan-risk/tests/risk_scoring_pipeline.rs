use plan_risk::workflows::catalog::ATTRIBUTE_COUNT;
use plan_risk::workflows::generator::GenerationRequest;
use plan_risk::workflows::pipeline::{plan_rng, run_end_to_end, score_plan_file};
use plan_risk::workflows::scoring::{MethodKind, MethodRequest, ScoringError, Weights};
use std::fs;
use std::path::Path;

const PLAN_FILE: &str = "\
P1 S1->S2->S3
P2 S2->S2->S3
S1 100,100,100,100,100,100,100,100,100
S2 50,50,50,50,50,50,50,50,50
S3 10,10,10,10,10,10,10,10,10
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture written");
    path
}

#[test]
fn raw_method_scores_three_service_chain() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "plans.txt", PLAN_FILE);
    let output = dir.path().join("risks.csv");

    let scores = score_plan_file(
        &input,
        &output,
        false,
        MethodRequest::new(MethodKind::RawWeighted),
        Weights::default(),
    )
    .expect("scoring succeeds");

    assert!((scores[0].risk_score - 48.0).abs() < 1e-9);
    // P2 counts S2 once: 0.9 * mean(50, 10).
    assert!((scores[1].risk_score - 27.0).abs() < 1e-9);

    let report = fs::read_to_string(&output).expect("report written");
    assert_eq!(
        report,
        "Plan,ServicePath,RiskScore\nP1,S1->S2->S3,48.0000\nP2,S2->S2->S3,27.0000\n"
    );
}

#[test]
fn repeat_flag_counts_every_occurrence() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "plans.txt", PLAN_FILE);
    let output = dir.path().join("risks.csv");

    let scores = score_plan_file(
        &input,
        &output,
        true,
        MethodRequest::new(MethodKind::RawWeighted),
        Weights::default(),
    )
    .expect("scoring succeeds");

    // 0.9 * mean(50, 50, 10)
    assert!((scores[1].risk_score - 33.0).abs() < 1e-9);
}

#[test]
fn historical_method_reads_reference_dataset() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "plans.txt", PLAN_FILE);
    let reference = write(
        dir.path(),
        "reference.txt",
        "# historical QWS rows\n0,0,0,0,0,0,0,0,0,Low\n200,200,200,200,200,200,200,200,200,High\n",
    );
    let output = dir.path().join("risks.csv");

    let mut request = MethodRequest::new(MethodKind::Historical);
    request.reference = Some(reference);
    let scores = score_plan_file(&input, &output, false, request, Weights::default())
        .expect("scoring succeeds");

    assert!((scores[0].risk_score - 0.24).abs() < 1e-9);
    let report = fs::read_to_string(&output).expect("report written");
    assert!(report.starts_with("Plan,ServicePath,H-RiskScore\nP1,S1->S2->S3,0.2400\n"));
}

#[test]
fn historical_single_row_reference_is_degenerate() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "plans.txt", PLAN_FILE);
    let reference = write(dir.path(), "reference.txt", "1,2,3,4,5,6,7,8,9\n");
    let output = dir.path().join("risks.csv");

    let mut request = MethodRequest::new(MethodKind::Historical);
    request.reference = Some(reference);
    let error = score_plan_file(&input, &output, false, request, Weights::default())
        .expect_err("zero-width range");

    assert!(matches!(error, ScoringError::DegenerateRange { .. }));
    assert!(!output.exists(), "no partial report on failure");
}

#[test]
fn threshold_method_writes_threshold_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(dir.path(), "plans.txt", PLAN_FILE);
    let output = dir.path().join("risks.csv");

    let mut request = MethodRequest::new(MethodKind::Threshold);
    request.ideal = Some(vec![100.0; ATTRIBUTE_COUNT]);
    request.critical = Some(vec![100.0; ATTRIBUTE_COUNT]);
    let scores = score_plan_file(&input, &output, false, request, Weights::default())
        .expect("scoring succeeds");

    // Beneficial: v / 100, non-beneficial: 1 - v / 100, six and three positions.
    let service = |v: f64| 0.1 * (6.0 * v / 100.0 + 3.0 * (1.0 - v / 100.0));
    let expected = (service(100.0) + service(50.0) + service(10.0)) / 3.0;
    assert!((scores[0].risk_score - expected).abs() < 1e-9);

    let report = fs::read_to_string(&output).expect("report written");
    assert!(report.starts_with("Plan,ServicePath,T-RiskScore\n"));
}

#[test]
fn missing_parameters_fail_before_input_is_read() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing_input = dir.path().join("never-created.txt");
    let output = dir.path().join("risks.csv");

    let error = score_plan_file(
        &missing_input,
        &output,
        false,
        MethodRequest::new(MethodKind::Threshold),
        Weights::default(),
    )
    .expect_err("thresholds required");

    match error {
        ScoringError::MissingParameter { method, parameter } => {
            assert_eq!(method, "threshold");
            assert_eq!(parameter, "ideal thresholds");
        }
        other => panic!("expected missing parameter, got {other:?}"),
    }
}

#[test]
fn unknown_service_fails_the_whole_batch() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write(
        dir.path(),
        "plans.txt",
        "P1 S1\nP2 S1->S4\nS1 1,1,1,1,1,1,1,1,1\n",
    );
    let output = dir.path().join("risks.csv");

    let error = score_plan_file(
        &input,
        &output,
        false,
        MethodRequest::new(MethodKind::RawWeighted),
        Weights::default(),
    )
    .expect_err("S4 is undeclared");

    assert!(error.to_string().contains("S4"));
    assert!(!output.exists());
}

#[test]
fn end_to_end_run_generates_and_scores_with_normalization() {
    let dir = tempfile::tempdir().expect("temp dir");
    let catalog = write(
        dir.path(),
        "qws.txt",
        "\
# Response Time,Availability,Throughput,Successability,Reliability,Compliance,Best Practices,Latency,Documentation,Service Name,WSDL Address
302.75,89,7.1,90,73,78,80,187.75,32,MAPPMatching,http://example.org/a
482,85,16,95,73,100,84,1,2,Compound2,http://example.org/b
3321.4,89,1.4,96,73,78,80,2.6,96,GBNIRHolidayDates,http://example.org/c
126.17,98,12,100,67,78,82,22.77,89,CasUsers,http://example.org/d
107,87,1.9,95,73,89,62,58.33,93,interopLab,http://example.org/e
",
    );
    let plan_path = dir.path().join("service_plans.txt");
    let risk_path = dir.path().join("service_plan_risks.csv");
    let request = GenerationRequest {
        num_plans: 5,
        max_plan_size: 3,
        service_repeat: false,
    };

    let outcome = run_end_to_end(
        &catalog,
        &plan_path,
        &risk_path,
        &request,
        Weights::default(),
        &mut plan_rng(Some(2024)),
    )
    .expect("pipeline succeeds");

    assert_eq!(outcome.plans.len(), 5);
    assert_eq!(outcome.scores.len(), 5);
    for score in &outcome.scores {
        let normalized = score.normalized_score.expect("raw method normalizes");
        assert!((0.0..=1.0).contains(&normalized));
    }

    let report = fs::read_to_string(&risk_path).expect("report written");
    let mut lines = report.lines();
    assert_eq!(
        lines.next(),
        Some("Plan,ServicePath,RiskScore,NormalizedScore")
    );
    assert_eq!(lines.count(), 5);
}
