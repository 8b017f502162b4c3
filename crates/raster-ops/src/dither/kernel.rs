//! Error diffusion kernel tables.
//!
//! Each kernel lists the forward/below neighbors that receive a share
//! of the quantization residual, as `(dx, dy, weight)` entries over a
//! common divisor. All ten tables propagate 100% of the residual: the
//! weights of every table sum to its divisor.

/// An error diffusion kernel.
///
/// `dy` is never negative: error only flows to pixels that have not
/// been processed yet in raster order. `max_dy` is the number of rows
/// the kernel reaches ahead, which sizes the accumulator window at
/// `max_dy + 1` rows.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries; each neighbor receives `weight / divisor`.
    pub entries: &'static [(i32, i32, u8)],

    /// Common divisor normalizing the weights.
    pub divisor: u8,

    /// Maximum `dy` over the entries.
    pub max_dy: usize,
}

/// Single-neighbor kernel: the whole residual moves one pixel right.
///
/// ```text
///    X   1
/// ```
///
/// No row carry, so only one accumulator row is ever live.
pub const SIMPLE: Kernel = Kernel {
    entries: &[(1, 0, 1)],
    divisor: 1,
    max_dy: 0,
};

/// Floyd-Steinberg kernel, the classic four-neighbor distribution.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

/// "False" Floyd-Steinberg: three neighbors, often mistaken for the
/// real thing. Cheaper but with visibly more directional texture.
///
/// ```text
///    X   3
///    3   2
/// ```
pub const FALSE_FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 3), (0, 1, 3), (1, 1, 2)],
    divisor: 8,
    max_dy: 1,
};

/// Jarvis-Judice-Ninke kernel: 12 neighbors over 3 rows.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

/// Stucki kernel: like JJN but with sharper center weights.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
    max_dy: 2,
};

/// Atkinson kernel, normalized to full propagation.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Six equal shares over two rows ahead.
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 6,
    max_dy: 2,
};

/// Burkes kernel: Stucki's top two rows only.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
    max_dy: 1,
};

/// Sierra (full, Sierra-3) kernel: 10 neighbors over 3 rows.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
};

/// Sierra Two-Row kernel: a faster two-row approximation.
///
/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
pub const SIERRA_TWO_ROW: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
    ],
    divisor: 16,
    max_dy: 1,
};

/// Sierra Lite kernel: the minimal Sierra variant.
///
/// ```text
///    X   2
///    1   1
/// ```
pub const SIERRA_LITE: Kernel = Kernel {
    entries: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
    max_dy: 1,
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [(&str, Kernel); 10] = [
        ("Simple", SIMPLE),
        ("Floyd-Steinberg", FLOYD_STEINBERG),
        ("False Floyd-Steinberg", FALSE_FLOYD_STEINBERG),
        ("Jarvis-Judice-Ninke", JARVIS_JUDICE_NINKE),
        ("Stucki", STUCKI),
        ("Atkinson", ATKINSON),
        ("Burkes", BURKES),
        ("Sierra", SIERRA),
        ("Sierra Two-Row", SIERRA_TWO_ROW),
        ("Sierra Lite", SIERRA_LITE),
    ];

    #[test]
    fn test_all_kernels_fully_normalized() {
        for (name, kernel) in ALL {
            let sum: u32 = kernel.entries.iter().map(|&(_, _, w)| w as u32).sum();
            assert_eq!(
                sum, kernel.divisor as u32,
                "{} weights must sum to the divisor (100% propagation)",
                name
            );
        }
    }

    #[test]
    fn test_all_kernels_max_dy_consistent() {
        for (name, kernel) in ALL {
            let actual = kernel
                .entries
                .iter()
                .map(|&(_, dy, _)| dy as usize)
                .max()
                .unwrap();
            assert_eq!(actual, kernel.max_dy, "{} max_dy mismatch", name);
        }
    }

    #[test]
    fn test_all_kernels_forward_only() {
        for (name, kernel) in ALL {
            for &(dx, dy, _) in kernel.entries {
                assert!(dy >= 0, "{} must not reach a previous row", name);
                assert!(
                    dy > 0 || dx > 0,
                    "{} must not target the current or an earlier pixel",
                    name
                );
            }
        }
    }

    #[test]
    fn test_simple_has_no_row_carry() {
        assert_eq!(SIMPLE.max_dy, 0);
        assert_eq!(SIMPLE.entries, &[(1, 0, 1)]);
    }
}
