use rand::Rng;

const ID_LENGTH: usize = 6;
const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates the short lowercase token used to namespace cloud resource
/// names per test run, so concurrently running tests never collide.
pub fn unique_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_CHARS[rng.gen_range(0..ID_CHARS.len())] as char)
        .collect()
}
