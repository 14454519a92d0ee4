use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

const FASTA: &str = "\
>INSR chr19:7150261-7150808
atgtccacctgggagcgatgctgctgctgctgtcaatttcacagaagttt
CTCAGCTCCACGGCTGGAGGGCGGgcatgGCATGtccagggcag
>MBNL chr3:152446461-152447003
ttgcttgcctgttcctatgaaagtYGCYcatgcatgatttggaaa
>CLASP1 chr2:121444593-121445363
CTCGTTGGTGCATGttttgcatttagcatgtttgcCATAGcatgg
";

const MOTIFS: &str = "ygcy\nGCAUG\n\ncatag\nYYYYYYYYYY\n";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("Figure_1.fasta"), FASTA).unwrap();
    fs::write(dir.join("motifs.txt"), MOTIFS).unwrap();
}

fn motif_mark(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("motif-mark").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_svg_named_after_fasta() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    motif_mark(dir.path())
        .args(["-f", "Figure_1.fasta", "-m", "motifs.txt", "-o", "plots", "-q"])
        .assert()
        .success();

    let svg = fs::read_to_string(dir.path().join("plots/Figure_1.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("INSR (94 bases)"));
    assert!(svg.contains("MBNL"));
    assert!(svg.contains("CLASP1"));
    assert!(svg.contains("YGCY"));
    assert!(svg.contains("Number of Bases"));

    let png = fs::read(dir.path().join("plots/Figure_1.png")).unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn png_can_be_turned_off() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    motif_mark(dir.path())
        .args(["-f", "Figure_1.fasta", "-m", "motifs.txt", "--no-png", "-q"])
        .assert()
        .success();
    assert!(dir.path().join("Figure_1.svg").exists());
    assert!(!dir.path().join("Figure_1.png").exists());

    fs::write(dir.path().join("run.yaml"), "# no raster copy\npng: false\n").unwrap();
    motif_mark(dir.path())
        .args(["-c", "run.yaml", "-f", "Figure_1.fasta", "-m", "motifs.txt"])
        .args(["-o", "from_config", "-q"])
        .assert()
        .success();
    assert!(dir.path().join("from_config/Figure_1.svg").exists());
    assert!(!dir.path().join("from_config/Figure_1.png").exists());
}

#[test]
fn writes_tables_and_is_deterministic() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    let run = |out: &str| {
        let json = format!("{out}.jsonl");
        let tsv = format!("{out}.tsv");
        motif_mark(dir.path())
            .args(["-f", "Figure_1.fasta", "-m", "motifs.txt", "--no-svg", "-q"])
            .args(["--json", json.as_str(), "--tsv", tsv.as_str()])
            .assert()
            .success();
    };
    run("first");
    run("second");

    let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(read("first.jsonl"), read("second.jsonl"));
    assert_eq!(read("first.tsv"), read("second.tsv"));
    assert!(!dir.path().join("Figure_1.svg").exists());
    assert!(dir.path().join("Figure_1.png").exists());

    let json = read("first.jsonl");
    assert_eq!(json.lines().count(), 3);

    let tsv = read("first.tsv");
    let mut rows = tsv.lines();
    assert_eq!(rows.next(), Some("id\tmotif\tstart\tend\tlane\tcolor"));
    assert!(tsv.lines().any(|r| r.starts_with("INSR\tGCAUG\t")));
    assert!(tsv.lines().any(|r| r.starts_with("CLASP1\tCATAG\t")));
    for row in rows {
        let fields = row.split('\t').collect::<Vec<_>>();
        assert_eq!(fields.len(), 6, "{row}");
        let start = fields[2].parse::<usize>().unwrap();
        let end = fields[3].parse::<usize>().unwrap();
        assert!(start < end);
    }
}

#[test]
fn config_file_and_flag_overrides() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    fs::write(
        dir.path().join("run.yaml"),
        "fasta: Figure_1.fasta\nmotifs: motifs.txt\nout_dir: from_config\nrender:\n  scale: 1\n",
    )
    .unwrap();

    motif_mark(dir.path())
        .args(["-c", "run.yaml", "-o", "from_flag", "-q"])
        .assert()
        .success();

    assert!(dir.path().join("from_flag/Figure_1.svg").exists());
    assert!(!dir.path().join("from_config").exists());
}

#[test]
fn invalid_motifs_are_dropped_unless_strict() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("bad.txt"), "YGCY\nGCXUG\n").unwrap();

    motif_mark(dir.path())
        .args(["-f", "Figure_1.fasta", "-m", "bad.txt", "--no-svg", "-q"])
        .args(["--tsv", "out.tsv"])
        .assert()
        .success();
    let tsv = fs::read_to_string(dir.path().join("out.tsv")).unwrap();
    assert!(tsv.lines().skip(1).all(|r| r.contains("\tYGCY\t")));

    motif_mark(dir.path())
        .args(["-f", "Figure_1.fasta", "-m", "bad.txt", "--strict", "-q"])
        .assert()
        .failure();
}

#[test]
fn missing_inputs_fail() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    motif_mark(dir.path())
        .args(["-m", "motifs.txt", "-q"])
        .assert()
        .failure();

    motif_mark(dir.path())
        .args(["-f", "missing.fasta", "-m", "motifs.txt", "-q"])
        .assert()
        .failure();
}

#[test]
fn empty_inputs_are_not_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.fa"), "").unwrap();
    fs::write(dir.path().join("none.txt"), "\n\n").unwrap();

    motif_mark(dir.path())
        .args(["-f", "empty.fa", "-m", "none.txt", "-q"])
        .assert()
        .success();

    assert!(dir.path().join("empty.svg").exists());
    assert!(dir.path().join("empty.png").exists());
}

#[test]
fn whitespace_before_first_record() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    fs::write(dir.path().join("padded.fa"), format!("\n\n{FASTA}")).unwrap();

    motif_mark(dir.path())
        .args(["-f", "padded.fa", "-m", "motifs.txt", "--no-png", "-q"])
        .assert()
        .success();
    let svg = fs::read_to_string(dir.path().join("padded.svg")).unwrap();
    assert!(svg.contains("INSR (94 bases)"));
}
