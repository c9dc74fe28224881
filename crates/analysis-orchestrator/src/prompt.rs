/// Instructions appended after the portfolio description.
const PORTFOLIO_INSTRUCTIONS: &str = "Please provide recommendations and analysis of the stock portfolio. \
List each stock recommendation on a separate line with details. \
Identify which stocks should be kept, which should be sold, and provide suggestions for new stocks to buy (that are not already in the portfolio). \
Present the results in a table format, showing the stocks to keep, sell, and buy in separate columns. \
Strictly write any information or statement only once. \
Tell quantity of how many stocks to buy and sell.";

/// Build the single user message sent to the model.
pub fn build_portfolio_prompt(portfolio_text: &str) -> String {
    format!("Portfolio: {}. {}", portfolio_text, PORTFOLIO_INSTRUCTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_wraps_portfolio_verbatim() {
        let prompt = build_portfolio_prompt("AAPL 10 shares, MSFT 5 shares");
        assert!(prompt.starts_with("Portfolio: AAPL 10 shares, MSFT 5 shares. Please provide"));
        assert!(prompt.ends_with("Tell quantity of how many stocks to buy and sell."));
    }

    #[test]
    fn test_prompt_exact_text() {
        let expected = "Portfolio: X. Please provide recommendations and analysis of the stock portfolio. \
List each stock recommendation on a separate line with details. Identify which stocks should be kept, \
which should be sold, and provide suggestions for new stocks to buy (that are not already in the portfolio). \
Present the results in a table format, showing the stocks to keep, sell, and buy in separate columns. \
Strictly write any information or statement only once. Tell quantity of how many stocks to buy and sell.";
        assert_eq!(build_portfolio_prompt("X"), expected);
    }
}
