//! Genome descriptions: chromosome names used to pre-register empty tracks
//! with [`GenomicArray::add_chromosomes`](crate::data_structs::GenomicArray::add_chromosomes).

use std::io::{
    BufReader,
    Read,
};

use log::debug;

/// Reads chromosome names from a FASTA index (`.fai`).
pub fn read_chrs_from_fai<R: Read>(reader: R) -> anyhow::Result<Vec<String>> {
    let index = bio::io::fasta::Index::new(BufReader::new(reader))?;
    let names = index
        .sequences()
        .into_iter()
        .map(|seq| seq.name)
        .collect::<Vec<_>>();
    debug!("Read {} chromosome names from FASTA index", names.len());
    Ok(names)
}

/// Reads record ids from a FASTA file.
pub fn read_chrs_from_fa<R: Read>(reader: R) -> anyhow::Result<Vec<String>> {
    let reader = bio::io::fasta::Reader::new(reader);
    let mut names = Vec::new();
    for record in reader.records() {
        names.push(record?.id().to_string());
    }
    debug!("Read {} chromosome names from FASTA", names.len());
    Ok(names)
}
