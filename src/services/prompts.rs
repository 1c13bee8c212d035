//! Prompt templates for the discovery and synthesis steps.
//!
//! Bullet counts and lengths are instructions to the model only; nothing
//! checks the generated report against them.

use crate::market_data::types::TickerQuote;

/// Step 1 prompt: ask for a JSON array of candidate tickers
pub fn discovery_prompt(target_date: &str) -> String {
    format!(
        r#"Identify 15 major public companies (mix of North America, Europe, Asia) that were top news drivers or price movers for {target_date}.
Include tech giants like Apple, Microsoft, NVIDIA, Amazon, Google, Meta, Tesla, etc.
Return ONLY a JSON array of tickers like ["AAPL", "MSFT", "TSLA", "NVDA", "ASML", "MC.PA", "7203.T", "SAP"]."#
    )
}

/// Paragraph naming the verified movers, or `None` when there are none
pub fn mandatory_context(movers: &[TickerQuote]) -> Option<String> {
    if movers.is_empty() {
        return None;
    }

    let listed = movers
        .iter()
        .map(TickerQuote::mover_label)
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!(
        "The following companies MUST be included as they meet the Mega-Cap Momentum Rule (Cap > $200B and Change >= ±2%): \n{listed}."
    ))
}

/// Step 3 prompt: the full report template
pub fn synthesis_prompt(display_date: &str, target_date: &str, mandatory_context: Option<&str>) -> String {
    let context = mandatory_context.unwrap_or_default();

    format!(
        r#"As a senior institutional analyst, generate the "Market News" for {display_date}.
Performance figures must reflect the close of {target_date}.

{context}

STRUCTURE AND MANDATORY INDEX REPORTING:
## North America
The VERY FIRST bullet point MUST be a consolidated overview of the major indices (S&P 500, Nasdaq, Dow Jones) in ONE single bullet point.
Example:
* **Market Indices**: The **S&P 500 (-1.2%)** fell to 6,721.43, while the **Nasdaq Composite (-1.8%)** led declines at 22,693.32, and the **Dow Jones Industrial Average (-0.5%)** proved more resilient, finishing at 47,885.97.
Then follow with 6-8 more bullets for individual company movers.

## Europe
* 5-6 Bullets focusing solely on company news. Do NOT include a market index overview bullet point here.

## Asia, Emerging Markets & Commodities
The VERY FIRST bullet point MUST be a consolidated overview of the major regional indices (Nikkei 225, Hang Seng) in ONE single bullet point.
Example:
* **Regional Indices**: The **Nikkei 225 (+0.4%)** advanced on yen weakness, while the **Hang Seng Index (-1.1%)** retreated amid property sector concerns.
Then follow with 4-6 more bullets for regional company movers and commodities like Oil and Gold.

RULES:
- Every bullet point MUST be between 115 and 250 characters. Do not exceed 250 characters.
- Bold the first entity or the "Market Indices"/"Regional Indices" header.
- Tone: Factual, institutional, dense. No emojis.
- ALWAYS include % change in parentheses: (**Entity Name (+2.1%)**).
- Ground everything in web search for accurate catalysts and closing prices for {target_date}."#
    )
}
