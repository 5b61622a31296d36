mod common;

use std::fs;

use common::Fixture;
use taxid_annotate::discovery::discover_assemblies;

#[test]
fn finds_genomic_fasta_in_sorted_order() {
    let fixture = Fixture::new();
    fixture.add_assembly("viral", "Zeta_virus", "GCF_000003.1_Z", ">a\nA\n", None);
    fixture.add_assembly("viral", "Alpha_virus", "GCF_000002.1_A", ">b\nC\n", None);
    let level = fixture.db().join("viral");

    let stray = level.join("Alpha_virus/latest_assembly_versions/GCF_000002.1_A");
    fs::write(stray.join("GCF_000002.1_A_protein.faa.gz"), b"").unwrap();
    fs::write(stray.join("md5checksums.txt"), b"").unwrap();
    fs::create_dir_all(level.join("Beta_virus/all_assembly_versions/GCF_9.1_B")).unwrap();

    let found = discover_assemblies(&level).unwrap();
    let ids = found.iter().map(|a| a.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["GCF_000002.1_A", "GCF_000003.1_Z"]);
    assert!(found[0].genbank.as_str().ends_with("GCF_000002.1_A_genomic.gbff.gz"));
}
