use rand::distributions::Alphanumeric;
use rand::Rng;

/// Random `[A-Za-z0-9]` string, used for share tokens and download tokens.
pub fn random_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
