//! Amounts in words, Indian numbering system (Crore / Lakh / Thousand).

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Spell out an amount as printed on invoices.
///
/// Zero, empty and unparseable input all read `"Zero"`. Negative amounts are
/// spelled by magnitude.
pub fn amount_in_words(amount: &str) -> String {
    let value = match amount.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v.abs(),
        _ => return "Zero".to_string(),
    };

    let cents = (value * 100.0).round() as u64;
    let (integer_part, paise) = (cents / 100, cents % 100);

    let mut words = spell_integer(integer_part);
    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&below_thousand(paise));
        words.push_str(" Paise");
    }
    words.push_str(" Rupees");
    words
}

fn spell_integer(mut n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    if n >= CRORE {
        // Crores above 999 are spelled recursively ("One Thousand Crore").
        parts.push(format!("{} Crore", spell_integer(n / CRORE)));
        n %= CRORE;
    }
    if n >= LAKH {
        parts.push(format!("{} Lakh", below_thousand(n / LAKH)));
        n %= LAKH;
    }
    if n >= THOUSAND {
        parts.push(format!("{} Thousand", below_thousand(n / THOUSAND)));
        n %= THOUSAND;
    }
    if n > 0 {
        parts.push(below_thousand(n));
    }
    parts.join(" ")
}

fn below_thousand(n: u64) -> String {
    match n {
        0 => String::new(),
        1..=9 => ONES[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{} {}", tens, ONES[ones as usize]),
            }
        }
        _ => {
            let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{} {}", hundreds, below_thousand(rest)),
            }
        }
    }
}
