//! Shared fixtures for the integration tests
#![allow(dead_code)]

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    pub name: &'static str,
    pub age: u32,
    pub city: &'static str,
}

impl Person {
    pub fn new(name: &'static str, age: u32, city: &'static str) -> Self {
        Self { name, age, city }
    }
}

pub fn people() -> Vec<Person> {
    vec![
        Person::new("Ada", 36, "London"),
        Person::new("Grace", 45, "New York"),
        Person::new("Linus", 28, "Helsinki"),
        Person::new("Barbara", 45, "Boston"),
        Person::new("Ken", 36, "New York"),
        Person::new("Edsger", 28, "Eindhoven"),
        Person::new("Margaret", 36, "Boston"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u32,
    pub customer: &'static str,
    pub amount: f64,
}

pub fn orders() -> Vec<Order> {
    vec![
        Order { id: 1, customer: "Ada", amount: 12.5 },
        Order { id: 2, customer: "Ken", amount: 40.0 },
        Order { id: 3, customer: "Ada", amount: 7.25 },
        Order { id: 4, customer: "Nobody", amount: 99.0 },
        Order { id: 5, customer: "Grace", amount: 3.0 },
    ]
}

/// `[1, 2, ..., n]`
pub fn one_to(n: i32) -> Vec<i32> {
    (1..=n).collect()
}

/// Deterministic pseudo-random values in `[0, modulo)` from a 64-bit LCG.
pub fn lcg_ints(seed: u64, count: usize, modulo: i32) -> Vec<i32> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % modulo as u64) as i32
        })
        .collect()
}
