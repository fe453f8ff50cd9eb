use enzymes::Enzymes;
use facility::Facility;
use lazy_static::lazy_static;

pub mod alignment;
pub mod enzymes;
pub mod facility;
pub mod iupac_code;
pub mod nucleic_sequence;
pub mod origin_format;
pub mod remote_lookup;
pub mod restriction_enzyme;
pub mod translation;

lazy_static! {
    // Strand pairing tables and the codon catalog
    pub static ref FACILITY: Facility = Facility::default();

    // Restriction enzymes
    pub static ref ENZYMES: Enzymes = Enzymes::default();
}
