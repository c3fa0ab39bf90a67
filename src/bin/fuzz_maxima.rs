//! AFL fuzz harness for FunctionMaxima.
//!
//! Replays a byte-encoded workload against a function and a `BTreeMap` model,
//! checking after every step that:
//! 1. The domain matches the model
//! 2. The maxima index holds exactly the local maxima
//! 3. A refused allocation leaves the function unchanged

use std::collections::BTreeMap;

use afl::fuzz;
use function_maxima::Budget;
use function_maxima::FunctionMaxima;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Set f(arg) = value
    Set { arg: u8, value: u8 },
    /// Remove arg from the domain
    Erase { arg: u8 },
    /// Set f(arg) = value with only `nodes` allocations available
    Starved { arg: u8, value: u8, nodes: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 3;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                // Values 0-7 so plateaus show up often
                let op = FuzzOp::Set { arg: rest[0], value: rest[1] % 8 };
                Some((op, &rest[2..]))
            }
            1 if !rest.is_empty() => Some((FuzzOp::Erase { arg: rest[0] }, &rest[1..])),
            2 if rest.len() >= 3 => {
                let op = FuzzOp::Starved {
                    arg: rest[0],
                    value: rest[1] % 8,
                    nodes: rest[2] % 6,
                };
                Some((op, &rest[3..]))
            }
            _ => None,
        }
    }
}

fn points(f: &FunctionMaxima<u8, u8, Budget>) -> Vec<(u8, u8)> {
    return f.iter().map(|p| (*p.arg(), *p.value())).collect();
}

fn maxima(f: &FunctionMaxima<u8, u8, Budget>) -> Vec<(u8, u8)> {
    return f.maxima().map(|p| (*p.arg(), *p.value())).collect();
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut f = FunctionMaxima::with_alloc(Budget::new(usize::MAX));
        let mut model: BTreeMap<u8, u8> = BTreeMap::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Set { arg, value } => {
                    f.set_value(arg, value).expect("unlimited budget");
                    model.insert(arg, value);
                }

                FuzzOp::Erase { arg } => {
                    f.erase(&arg).expect("unlimited budget");
                    model.remove(&arg);
                }

                FuzzOp::Starved { arg, value, nodes } => {
                    let before_points = points(&f);
                    let before_maxima = maxima(&f);
                    *f.alloc_mut() = Budget::new(nodes as usize);

                    match f.set_value(arg, value) {
                        Ok(()) => {
                            model.insert(arg, value);
                        }
                        Err(_) => {
                            assert_eq!(points(&f), before_points, "rollback changed the domain");
                            assert_eq!(maxima(&f), before_maxima, "rollback changed the maxima");
                        }
                    }
                    *f.alloc_mut() = Budget::new(usize::MAX);
                }
            }

            // CRITICAL INVARIANT: maxima index is exactly the set of local maxima
            assert!(f.check_invariants(), "maxima index out of sync after {:?}", op);
        }

        let expected: Vec<(u8, u8)> = model.iter().map(|(&a, &v)| (a, v)).collect();
        assert_eq!(points(&f), expected, "domain diverged from model");
    });
}
