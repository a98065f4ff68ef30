use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{MapGenError, Result};

/// Все возможные значения счётчика живых соседей (0..=8)
const ALL_COUNTS: u16 = 0x1FF;

/// Предикат над числом живых соседей.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Битовая маска допустимых значений счётчика: бит `n` ⇒ `n` соседей подходит
    Counts(u16),
    /// Срабатывает с вероятностью `density`, независимо от соседей.
    ///
    /// Случайное число привязано к индексу клетки, поэтому результат не зависит
    /// от порядка обхода и одинаков при последовательном и параллельном шаге.
    Chance { density: f64, seed: u64 },
}

impl Rule {
    pub const fn never() -> Self {
        Rule::Counts(0)
    }

    pub const fn always() -> Self {
        Rule::Counts(ALL_COUNTS)
    }

    pub const fn exactly(n: u8) -> Self {
        if n > 8 {
            return Rule::never();
        }
        Rule::Counts(1 << n)
    }

    pub const fn at_least(n: u8) -> Self {
        if n > 8 {
            return Rule::never();
        }
        Rule::Counts(ALL_COUNTS & !((1u16 << n) - 1))
    }

    pub const fn at_most(n: u8) -> Self {
        if n >= 8 {
            return Rule::always();
        }
        Rule::Counts((1u16 << (n + 1)) - 1)
    }

    pub fn any_of(counts: &[u8]) -> Self {
        Rule::Counts(
            counts
                .iter()
                .filter(|&&n| n <= 8)
                .fold(0, |mask, &n| mask | (1 << n)),
        )
    }

    pub fn chance(density: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(MapGenError::InvalidDensity(density));
        }
        Ok(Rule::Chance { density, seed })
    }

    /// Объединение двух масок; случайное правило объединению не подлежит и возвращается как есть
    #[must_use]
    pub fn or(self, other: Rule) -> Rule {
        match (self, other) {
            (Rule::Counts(a), Rule::Counts(b)) => Rule::Counts(a | b),
            (chance @ Rule::Chance { .. }, _) | (_, chance @ Rule::Chance { .. }) => chance,
        }
    }

    /// Маска без указанных значений счётчика
    #[must_use]
    pub fn except(self, counts: &[u8]) -> Rule {
        match (self, Rule::any_of(counts)) {
            (Rule::Counts(mask), Rule::Counts(removed)) => Rule::Counts(mask & !removed),
            (rule, _) => rule,
        }
    }

    pub fn test(&self, live: u8, cell: usize) -> bool {
        match *self {
            Rule::Counts(mask) => live <= 8 && mask & (1 << live) != 0,
            Rule::Chance { density, seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                // одно u64 занимает два 32-битных слова потока
                rng.set_word_pos(cell as u128 * 2);
                rng.gen_bool(density)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(rule: Rule) -> Vec<u8> {
        (0..=8).filter(|&n| rule.test(n, 0)).collect()
    }

    #[test]
    fn count_constructors() {
        assert_eq!(accepted(Rule::exactly(3)), vec![3]);
        assert_eq!(accepted(Rule::at_least(6)), vec![6, 7, 8]);
        assert_eq!(accepted(Rule::at_most(2)), vec![0, 1, 2]);
        assert_eq!(accepted(Rule::any_of(&[1, 4, 9])), vec![1, 4]);
        assert!(accepted(Rule::never()).is_empty());
        assert_eq!(accepted(Rule::always()).len(), 9);
        assert!(accepted(Rule::at_least(9)).is_empty());
    }

    #[test]
    fn combinators() {
        let rule = Rule::exactly(3).or(Rule::at_least(5));
        assert_eq!(accepted(rule), vec![3, 5, 6, 7, 8]);
        assert_eq!(accepted(Rule::at_least(3).except(&[4, 8])), vec![3, 5, 6, 7]);
    }

    #[test]
    fn chance_rejects_bad_density() {
        assert!(matches!(
            Rule::chance(1.5, 0),
            Err(MapGenError::InvalidDensity(_))
        ));
        assert!(Rule::chance(-0.1, 0).is_err());
        assert!(Rule::chance(0.0, 0).is_ok());
    }

    #[test]
    fn chance_is_keyed_by_cell() {
        let rule = Rule::chance(0.5, 42).unwrap();
        let first: Vec<bool> = (0..64).map(|i| rule.test(0, i)).collect();
        let again: Vec<bool> = (0..64).rev().map(|i| rule.test(8, i)).collect();
        let again: Vec<bool> = again.into_iter().rev().collect();
        assert_eq!(first, again);
        assert!(first.iter().any(|&b| b));
        assert!(first.iter().any(|&b| !b));
    }

    #[test]
    fn chance_extremes() {
        let none = Rule::chance(0.0, 7).unwrap();
        let all = Rule::chance(1.0, 7).unwrap();
        assert!((0..100).all(|i| !none.test(3, i)));
        assert!((0..100).all(|i| all.test(3, i)));
    }
}
