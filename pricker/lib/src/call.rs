use std::fmt::{Display, Formatter};

use pricker_rows::{Change, Row};

/// The call made at the start of a six.  The call replaces the `n` change which would otherwise
/// begin the six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Call {
    #[default]
    Plain,
    /// Makes the third-from-last place, swapping the back pair
    Bob,
    /// Makes the last three places
    Single,
}

impl Call {
    /// Applies the change for this `Call` to a [`Row`].
    pub fn permute(self, row: &mut Row) {
        let n = row.stage().num_bells();
        match self {
            Call::Plain => Change::N.permute(row),
            Call::Bob => {
                Self::swap_front(row);
                row.swap(n - 2, n - 1);
            }
            Call::Single => Self::swap_front(row),
        }
    }

    /// Swaps every pair in front of the last three places
    fn swap_front(row: &mut Row) {
        let n = row.stage().num_bells();
        for i in (0..n - 3).step_by(2) {
            row.swap(i, i + 1);
        }
    }

    /// The lower-case name of this `Call`, as used when exporting to Siril.
    pub fn name(self) -> &'static str {
        match self {
            Call::Plain => "plain",
            Call::Bob => "bob",
            Call::Single => "single",
        }
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use pricker_rows::{Row, Stage};

    use super::Call;

    #[test]
    fn permute() {
        #[track_caller]
        fn check(call: Call, stage: Stage, exp: &str) {
            let mut row = Row::rounds(stage);
            call.permute(&mut row);
            assert_eq!(row.to_string(), exp);
        }

        check(Call::Plain, Stage::CINQUES, "2143658709E");
        check(Call::Bob, Stage::CINQUES, "214365879E0");
        check(Call::Single, Stage::CINQUES, "2143658790E");
        check(Call::Plain, Stage::TRIPLES, "2143657");
        check(Call::Bob, Stage::TRIPLES, "2143576");
        check(Call::Single, Stage::TRIPLES, "2143567");
    }

    #[test]
    fn default_is_plain() {
        assert_eq!(Call::default(), Call::Plain);
        assert_eq!(Call::Single.to_string(), "single");
    }
}
