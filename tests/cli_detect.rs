use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn command_detect_distance() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("chimr")?;
    let output = cmd
        .arg("detect")
        .arg("tests/chimera/queries.fa")
        .arg("--ref")
        .arg("tests/chimera/templates.fa")
        .arg("--search")
        .arg("distance")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.lines().next().unwrap().starts_with("#query\tchimera\tparent"));

    assert!(stdout.contains("chimeric\tyes\tP1\t3\t25\t0\t21\t87.50\t1.1429\t100.00\n"));
    assert!(stdout.contains("chimeric\tyes\tP2\t26\t43\t22\t39\t87.50\t1.1429\t100.00\n"));
    assert!(stdout.contains("p1_copy\tno\t-\t-\t-\t-\t-\t-\t-\t-\n"));
    assert!(stdout.contains("lowcov\tunknown\t-\t-\t-\t-\t-\t-\t-\t-\n"));

    // input order is kept
    let names: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(names, vec!["chimeric", "chimeric", "p1_copy", "lowcov"]);

    Ok(())
}

#[test]
fn command_detect_kmer() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("chimr")?;
    let output = cmd
        .arg("detect")
        .arg("tests/chimera/queries.fa")
        .arg("--ref")
        .arg("tests/chimera/templates.fa")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("chimeric\tyes\tP1\t"));
    assert!(stdout.contains("chimeric\tyes\tP2\t"));
    assert!(stdout.contains("p1_copy\tno\t"));
    assert!(stdout.contains("lowcov\tunknown\t"));
    assert!(!stdout.contains("\tP3\t"));

    Ok(())
}

#[test]
fn command_detect_blast() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("out.tsv");

    let mut cmd = Command::cargo_bin("chimr")?;
    cmd.arg("detect")
        .arg("tests/chimera/queries.fa")
        .arg("--ref")
        .arg("tests/chimera/templates.fa")
        .arg("--search")
        .arg("blast")
        .arg("--parallel")
        .arg("2")
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    let content = std::fs::read_to_string(&outfile)?;
    assert!(content.contains("chimeric\tyes\tP1\t"));
    assert!(content.contains("chimeric\tyes\tP2\t"));
    assert!(content.contains("lowcov\tunknown\t"));

    Ok(())
}

#[test]
fn command_detect_length_mismatch() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("chimr")?;
    cmd.arg("detect")
        .arg("tests/chimera/short.fa")
        .arg("--ref")
        .arg("tests/chimera/templates.fa")
        .arg("--search")
        .arg("distance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("aligned length"));

    Ok(())
}

#[test]
fn command_detect_bad_args() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("chimr")?;
    cmd.arg("detect")
        .arg("tests/chimera/queries.fa")
        .arg("--ref")
        .arg("tests/chimera/templates.fa")
        .arg("--search")
        .arg("usearch")
        .assert()
        .failure();

    let mut cmd = Command::cargo_bin("chimr")?;
    cmd.arg("detect")
        .arg("tests/chimera/queries.fa")
        .arg("--ref")
        .arg("tests/chimera/templates.fa")
        .arg("--kmer")
        .arg("40")
        .assert()
        .failure()
        .stderr(predicate::str::contains("k-mer size"));

    let mut cmd = Command::cargo_bin("chimr")?;
    cmd.arg("detect")
        .arg("tests/chimera/queries.fa")
        .assert()
        .failure();

    Ok(())
}
