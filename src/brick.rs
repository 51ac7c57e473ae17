//! Brick kinds and their rotation variants.

/// Side length of the square box every variant is laid out in.
pub const DIMENSION: u8 = 4;

/// Colour key stored in the grid for a frozen cell. 0 is never used by a brick.
pub type ColorKey = u8;

/// The seven brick kinds, in table order (O, I, L, J, T, S, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrickKind {
    O,
    I,
    L,
    J,
    T,
    S,
    Z,
}

impl BrickKind {
    pub const ALL: [Self; 7] = [Self::O, Self::I, Self::L, Self::J, Self::T, Self::S, Self::Z];

    /// Rotation variants as flattened offsets into the `DIMENSION x DIMENSION` box.
    pub fn variants(self) -> &'static [[u8; 4]] {
        match self {
            Self::O => &[[5, 6, 9, 10]],
            Self::I => &[[4, 5, 6, 7], [1, 5, 9, 13]],
            Self::L => &[[2, 4, 5, 6], [1, 5, 9, 10], [4, 5, 6, 8], [1, 2, 6, 10]],
            Self::J => &[[5, 9, 10, 11], [1, 2, 5, 9], [4, 5, 6, 10], [2, 6, 9, 10]],
            Self::T => &[[2, 5, 6, 7], [2, 6, 7, 10], [5, 6, 7, 10], [2, 5, 6, 10]],
            Self::S => &[[6, 7, 9, 10], [1, 5, 6, 10]],
            Self::Z => &[[5, 6, 10, 11], [2, 5, 6, 9]],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::I => "I",
            Self::L => "L",
            Self::J => "J",
            Self::T => "T",
            Self::S => "S",
            Self::Z => "Z",
        }
    }

    /// Position in [`BrickKind::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Stable colour key: ordinal + 1, so 1..=7.
    pub fn color_key(self) -> ColorKey {
        self.ordinal() as ColorKey + 1
    }
}

/// A brick kind together with its active rotation variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brick {
    kind: BrickKind,
    variant: usize,
}

impl Brick {
    pub fn new(kind: BrickKind) -> Self {
        Self { kind, variant: 0 }
    }

    pub fn kind(&self) -> BrickKind {
        self.kind
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    pub fn color_key(&self) -> ColorKey {
        self.kind.color_key()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The 4 flattened offsets of the active variant.
    pub fn occupied_offsets(&self) -> &'static [u8; 4] {
        &self.kind.variants()[self.variant]
    }

    /// Active variant as (dx, dy) pairs inside the box.
    pub fn plain_coordinates(&self) -> [(u8, u8); 4] {
        self.occupied_offsets()
            .map(|p| (p % DIMENSION, p / DIMENSION))
    }

    /// Returns whether the variant actually changed.
    pub fn rotate_forward(&mut self) -> bool {
        self.rotate(1)
    }

    /// Returns whether the variant actually changed.
    pub fn rotate_backward(&mut self) -> bool {
        self.rotate(-1)
    }

    fn rotate(&mut self, direction: isize) -> bool {
        let count = self.kind.variants().len();
        if count < 2 {
            return false;
        }
        self.variant = (self.variant as isize + direction).rem_euclid(count as isize) as usize;
        true
    }
}
