use std::{fmt, str::FromStr};

use thiserror::Error;

/// Seat letters are drawn from the Latin alphabet, so a cabin row holds at most 26 seats.
pub const MAX_SEATS_IN_ROW: i32 = 26;

/// A seat label such as `"10A"`: the row number followed by one seat letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLabel {
    pub row: i32,
    pub letter: char,
}

impl SeatLabel {
    /// Zero-based position of the seat letter in the alphabet (`A` = 0).
    pub fn letter_index(&self) -> i32 {
        self.letter as i32 - 'A' as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("seat label must be a row number followed by a single letter, got {0:?}")]
pub struct ParseSeatLabelError(pub String);

impl FromStr for SeatLabel {
    type Err = ParseSeatLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeatLabelError(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next_back().ok_or_else(err)?;
        if !letter.is_ascii_alphabetic() {
            return Err(err());
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let row = digits.parse::<i32>().map_err(|_| err())?;
        Ok(Self {
            row,
            letter: letter.to_ascii_uppercase(),
        })
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "seat {seat:?} is not valid for row {row}: seat letter must be one of the first {seats_in_row} letters and row must be in range (0, {rows})"
)]
pub struct SeatError {
    pub seat: String,
    pub row: i32,
    pub seats_in_row: i32,
    pub rows: i32,
}

/// Checks a ticket's `row`/`seat` pair against an airplane layout of
/// `rows` x `seats_in_row`.
pub fn validate(seat: &str, row: i32, seats_in_row: i32, rows: i32) -> Result<(), SeatError> {
    let error = || SeatError {
        seat: seat.to_string(),
        row,
        seats_in_row,
        rows,
    };

    let label = seat.parse::<SeatLabel>().map_err(|_| error())?;
    if label.letter_index() >= seats_in_row || label.row != row || row < 0 || row > rows {
        return Err(error());
    }
    Ok(())
}

/// Checks already sold `(row, seat)` pairs against a new layout and reports
/// the first one that would no longer fit.
pub fn ensure_layout_fits<'a, I>(sold: I, seats_in_row: i32, rows: i32) -> Result<(), SeatError>
where
    I: IntoIterator<Item = (i32, &'a str)>,
{
    sold.into_iter()
        .try_for_each(|(row, seat)| validate(seat, row, seats_in_row, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_row_and_letter() {
        let label: SeatLabel = "10A".parse().unwrap();
        assert_eq!(label.row, 10);
        assert_eq!(label.letter, 'A');
        assert_eq!(label.letter_index(), 0);
        assert_eq!(label.to_string(), "10A");

        let lower: SeatLabel = "7f".parse().unwrap();
        assert_eq!(lower.letter, 'F');
        assert_eq!(lower.letter_index(), 5);
    }

    #[test]
    fn rejects_labels_that_cannot_be_decomposed() {
        for bad in ["", "A", "10", "1A0", "-1A", "10AB", "1 A", "x1A"] {
            assert!(bad.parse::<SeatLabel>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn accepts_seat_inside_layout() {
        assert!(validate("10A", 10, 6, 20).is_ok());
        assert!(validate("10F", 10, 6, 20).is_ok());
        assert!(validate("20A", 20, 6, 20).is_ok());
        assert!(validate("0A", 0, 6, 20).is_ok());
    }

    #[test]
    fn rejects_letter_beyond_seats_in_row() {
        let err = validate("10G", 10, 6, 20).unwrap_err();
        assert_eq!(err.seats_in_row, 6);
        assert_eq!(err.rows, 20);
        let message = err.to_string();
        assert!(message.contains("first 6 letters"));
        assert!(message.contains("(0, 20)"));
    }

    #[test]
    fn rejects_row_mismatch_and_out_of_range_rows() {
        assert!(validate("11A", 10, 6, 20).is_err());
        assert!(validate("21A", 21, 6, 20).is_err());
        assert!(validate("1A", -1, 6, 20).is_err());
    }

    #[test]
    fn validity_matches_layout_bounds() {
        let (rows, seats_in_row) = (4, 3);
        for row in -1..=rows + 1 {
            for index in 0..MAX_SEATS_IN_ROW {
                let letter = (b'A' + index as u8) as char;
                let seat = format!("{}{}", row.max(0), letter);
                let expected = (0..=rows).contains(&row) && index < seats_in_row;
                assert_eq!(
                    validate(&seat, row, seats_in_row, rows).is_ok(),
                    expected,
                    "row={row} seat={seat}"
                );
            }
        }
    }

    #[test]
    fn layout_changes_must_keep_sold_seats() {
        let sold = [(3, "3C"), (12, "12A")];
        assert!(ensure_layout_fits(sold, 6, 20).is_ok());
        assert!(ensure_layout_fits(sold, 3, 12).is_ok());
        assert!(ensure_layout_fits(std::iter::empty(), 1, 1).is_ok());

        let err = ensure_layout_fits(sold, 2, 20).unwrap_err();
        assert_eq!(err.seat, "3C");
        let err = ensure_layout_fits(sold, 6, 10).unwrap_err();
        assert_eq!(err.seat, "12A");
        assert_eq!(err.rows, 10);
    }
}
