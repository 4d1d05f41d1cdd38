use crate::shared::money::format_dollars;

const BRAND_ORANGE: &str = "#de6b22";
const SUCCESS_GREEN: &str = "#4caf50";
const ALERT_RED: &str = "#ff5722";

pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Escapes user-supplied text (names, item titles) before it lands in markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(header_color: &str, tagline: &str, content: &str, footer: &str) -> String {
    format!(
        r#"<div style="max-width: 600px; margin: 0 auto; font-family: Arial, sans-serif;">
  <div style="background: {header_color}; padding: 30px; text-align: center;">
    <h1 style="color: white; margin: 0; font-size: 28px;">AuctionHub</h1>
    <p style="color: white; margin: 10px 0 0 0; opacity: 0.9;">{tagline}</p>
  </div>
  <div style="padding: 40px 30px; background: #f9f9f9; color: #444; line-height: 1.6;">
{content}
  </div>
  <div style="background: #333; padding: 30px; text-align: center; color: white;">
    <p style="margin: 0; opacity: 0.8; font-size: 14px;">{footer}</p>
  </div>
</div>"#
    )
}

pub fn verification(name: &str, code: &str) -> RenderedEmail {
    let content = format!(
        r#"    <h2 style="color: #333;">Hi {name}!</h2>
    <p>Thanks for joining AuctionHub. Use the code below to verify your email address:</p>
    <div style="background: white; padding: 30px; border-radius: 10px; text-align: center; border: 2px dashed {BRAND_ORANGE};">
      <div style="font-size: 36px; font-weight: bold; color: {BRAND_ORANGE}; letter-spacing: 8px; font-family: monospace;">{code}</div>
    </div>
    <p>The code expires in <strong>10 minutes</strong>. Never share it with anyone.</p>"#,
        name = escape_html(name),
        code = escape_html(code),
    );

    RenderedEmail {
        subject: "Verify Your AuctionHub Account".to_string(),
        html: layout(
            BRAND_ORANGE,
            "Welcome to the marketplace!",
            &content,
            "If you didn't create an account, you can safely ignore this email.",
        ),
    }
}

pub fn bid_confirmation(name: &str, item_name: &str, amount_cents: i64) -> RenderedEmail {
    let content = format!(
        r#"    <h2 style="color: #333;">Hi {name}!</h2>
    <p>Your bid has been placed successfully.</p>
    <div style="background: white; padding: 20px; border-radius: 8px;">
      <p style="margin: 0;"><strong>Item:</strong> {item}</p>
      <p style="margin: 10px 0 0 0;"><strong>Your bid:</strong> ${amount}</p>
    </div>
    <p>You're currently the highest bidder. We'll let you know if someone outbids you.</p>"#,
        name = escape_html(name),
        item = escape_html(item_name),
        amount = format_dollars(amount_cents),
    );

    RenderedEmail {
        subject: "Bid confirmation - AuctionHub".to_string(),
        html: layout(SUCCESS_GREEN, "Bid Confirmation", &content, "Happy bidding!<br>The AuctionHub Team"),
    }
}

pub fn outbid(name: &str, item_name: &str, previous_amount_cents: i64) -> RenderedEmail {
    let content = format!(
        r#"    <h2 style="color: #333;">Hi {name}!</h2>
    <p>You've been outbid on <strong>{item}</strong>. Your bid of <strong>${amount}</strong> is no longer the highest.</p>
    <p>Place a new bid to get back in the lead.</p>"#,
        name = escape_html(name),
        item = escape_html(item_name),
        amount = format_dollars(previous_amount_cents),
    );

    RenderedEmail {
        subject: "You've been outbid on AuctionHub".to_string(),
        html: layout(ALERT_RED, "Bid Update", &content, "Happy bidding!<br>The AuctionHub Team"),
    }
}

pub fn auction_won(name: &str, item_name: &str, winning_bid_cents: i64) -> RenderedEmail {
    let content = format!(
        r#"    <h2 style="color: #333;">You Won!</h2>
    <p>Congratulations {name}! You've won the auction for <strong>{item}</strong>.</p>
    <div style="background: white; padding: 20px; border-radius: 8px; border: 2px solid {SUCCESS_GREEN};">
      <p style="margin: 0;"><strong>Item:</strong> {item}</p>
      <p style="margin: 10px 0 0 0;"><strong>Winning bid:</strong> ${amount}</p>
    </div>
    <p>The seller will be in touch soon to arrange payment and delivery.</p>"#,
        name = escape_html(name),
        item = escape_html(item_name),
        amount = format_dollars(winning_bid_cents),
    );

    RenderedEmail {
        subject: "Congratulations! You won the auction - AuctionHub".to_string(),
        html: layout(SUCCESS_GREEN, "Congratulations!", &content, "Enjoy your new item!<br>The AuctionHub Team"),
    }
}
