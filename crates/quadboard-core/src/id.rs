use rand::Rng;

const ID_PREFIX: &str = "note-";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a client-side note id: `note-` followed by nine base-36 characters.
///
/// Not collision-proof; the id space is large enough for a personal board.
pub fn generate_note_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{ID_PREFIX}{suffix}")
}
