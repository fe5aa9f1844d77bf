use serde::Deserialize;

use rcpc_core::{CodeDescriptor, Term};

/// Wire-format termination mode, converted into [`rcpc_core::Term`] below.
/// Kept separate from the library type so `rcpc-core` itself never depends
/// on `serde` — only the CLI's config layer does, the same split
/// `tetra-config`/`tetra-core` use in the teacher workspace.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TermDto {
    Flush,
    Truncate,
    TailBiting,
}

/// TOML shape of a code descriptor file, one row of `next_output` per
/// state, most-recent-bit-in-low-position as the library expects.
#[derive(Debug, Deserialize)]
pub struct CodeDescriptorDto {
    pub k: u8,
    pub n: u8,
    pub len: usize,
    pub term: TermDto,
    pub next_output: Vec<[u32; 2]>,
    #[serde(default)]
    pub next_term_output: Option<Vec<u32>>,
    #[serde(default)]
    pub puncture: Option<Vec<usize>>,
}

/// Converts a parsed DTO into the descriptor the library consumes.
pub fn apply_descriptor_patch(dto: CodeDescriptorDto) -> CodeDescriptor {
    let term = match dto.term {
        TermDto::Flush => Term::Flush,
        TermDto::Truncate => Term::Truncate,
        TermDto::TailBiting => Term::TailBiting,
    };
    CodeDescriptor {
        k: dto.k,
        n: dto.n,
        len: dto.len,
        term,
        next_output: dto.next_output,
        next_term_output: dto.next_term_output,
        puncture: dto.puncture,
    }
}

/// Loads and converts a code descriptor from a TOML file, in the same
/// load-then-patch shape as `tetra_config::toml_config::from_file`.
pub fn load_descriptor(path: &str) -> Result<CodeDescriptor, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {path}: {e}"))?;
    let dto: CodeDescriptorDto =
        toml::from_str(&text).map_err(|e| format!("failed to parse {path}: {e}"))?;
    Ok(apply_descriptor_patch(dto))
}
