use rand::Rng;

/// Uniformly random slot choices for `n_tricks` tricks.
///
/// While the deck still refills hands every slot is live. With two tricks
/// left only two cards remain in hand, and the last trick has a single card.
pub fn random_choices<R: Rng + ?Sized>(n_tricks: usize, rng: &mut R) -> Vec<u8> {
    (0..n_tricks)
        .map(|i| match n_tricks - i {
            1 => 0,
            2 => rng.gen_range(0..2),
            _ => rng.gen_range(0..3),
        })
        .collect()
}
