/// What a letter in a peer's flag string means.
pub fn explain(flag: char) -> Option<&'static str> {
    match flag {
        'O' => Some("Optimistic unchoke"),
        'D' => Some("Downloading from this peer"),
        'd' => Some("We would download from this peer if they'd let us"),
        'U' => Some("Uploading to peer"),
        'u' => Some("We would upload to this peer if they'd ask"),
        'K' => Some("Peer has unchoked us, but we're not interested"),
        '?' => Some("We unchoked this peer, but they're not interested"),
        'E' => Some("Encrypted Connection"),
        'H' => Some("Peer was discovered through Distributed Hash Table (DHT)"),
        'X' => Some("Peer was discovered through Peer Exchange (PEX)"),
        'I' => Some("Peer is an incoming connection"),
        'T' => Some("Peer is connected via uTP"),
        _ => None,
    }
}

/// One entry per flag: `"D: Downloading from this peer"`, or just the flag
/// when it has no known meaning.
pub fn describe(flags: &str) -> Vec<String> {
    flags
        .chars()
        .map(|flag| match explain(flag) {
            Some(explanation) => format!("{}: {}", flag, explanation),
            None => flag.to_string(),
        })
        .collect()
}
