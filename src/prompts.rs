//! Fixed instructions and request messages sent to the text-generation service.

use crate::config::BrochureTone;

/// System instructions for choosing brochure-relevant links
pub const LINK_FILTER_INSTRUCTIONS: &str = r#"
You are an expert web analyst tasked with identifying key company information.
You will be provided with a raw list of links found on a webpage.
Your goal is to intelligently select only those links that would be **most relevant** for a concise company brochure.
Think: "What would a prospective customer, investor, or job applicant want to know?"
Prioritize links like "About Us," "Company," "Careers," "Our Team," "What We Offer," "Products," "Solutions," "Blog" (if relevant for insights).
**Absolutely exclude** irrelevant links such as: "Terms of Service," "Privacy Policy," "Contact Us" (unless it's a primary sales contact), internal navigation anchors (e.g., #section-id), or email addresses.

**Your response MUST be in strict JSON format**, like this example:

{
"links": [
{"type": "about page", "url": "https://full.url/goes/here/about"},
{"type": "careers page", "url": "https://another.full.url/careers"},
{"type": "blog", "url": "https://company.com/blog"}
]
}
"#;

/// System instructions for the brochure writer
pub const BROCHURE_INSTRUCTIONS: &str = r#"
You are an expert marketing copywriter and content strategist.
Your mission is to analyze the provided text content from a company's website (including its main page and relevant sub-pages)
and craft a concise, compelling, and professional brochure.

**Your brochure should be designed to appeal to three key audiences simultaneously:**
1.  **Prospective Customers:** Emphasize the value, solutions, and unique benefits the company offers. How do they solve problems?
2.  **Investors:** Focus on the company's vision, growth potential, innovation, and market position. Why is this a good investment?
3.  **Potential Recruits:** Highlight the company culture, mission, team values, and career opportunities. Why should someone work here?

**Structure your brochure with clear, logical sections (if information is available in the provided content):**
* **Introduction:** A captivating hook that introduces the company and its core purpose.
* **About [Company Name]:** Who is this company, what do they do, and what is their overarching mission or vision?
* **What We Offer / Solutions:** Detail their products, services, or solutions and how they benefit users.
* **Our Impact / Success Stories:** Showcase achievements, key customers, or positive results.
* **Culture & Team:** Describe the work environment, company values, and what makes their team special.
* **Careers / Join Us:** Provide insight into job opportunities and why someone should join their team.
* **Conclusion / Call to Action:** A brief summary and clear next steps (e.g., visit website, contact us).

**Formatting Guidelines:**
* Respond entirely in clean, readable **Markdown format**.
* Use clear headings (e.g., `## About [Company Name]`, `### Our Solutions`).
* Employ bullet points for lists of features, benefits, or cultural values.
* Keep the language concise and impactful. Avoid overly technical jargon unless absolutely necessary and explained.
* Ensure a professional, engaging tone that suits a company brochure.

**Crucial Rule:** Only use information directly found in the provided website content. Do not invent facts, details, or statistics. If specific information for a section is not present, gracefully omit that section or provide a general statement based on available context.

"#;

/// Lighter persona for the same job
pub const HUMOROUS_BROCHURE_INSTRUCTIONS: &str = r#"
You're not just any copywriter; you're a stand-up comedian of content!
Analyze this company's website content and whip up a hilariously engaging,
slightly cheeky, but still super informative brochure for customers, investors, and recruits.
Make it witty, throw in a clever joke or two, but still get the main points across.
Keep it in Markdown, use fun headings, and don't be afraid to make 'em smile.

**Crucial Rule:** Only use information directly found in the provided website content. Do not invent facts, details, or statistics.
"#;

pub fn brochure_instructions(tone: BrochureTone) -> &'static str {
    match tone {
        BrochureTone::Professional => BROCHURE_INSTRUCTIONS,
        BrochureTone::Humorous => HUMOROUS_BROCHURE_INSTRUCTIONS,
    }
}

/// User message listing every outbound link of `page_url`
pub fn link_request_message(page_url: &str, links: &[String]) -> String {
    let mut message = format!("Okay, AI expert, I've just visited **{page_url}**.\n");
    message.push_str(
        "Here's the full list of links I found on that page. Please apply your expert filtering, ",
    );
    message.push_str(
        "keeping only the brochure-worthy ones and providing them in the JSON format we discussed.\n",
    );
    message.push_str("Here are the links:\n");
    message.push_str(&links.join("\n"));
    message
}

/// Opening of the brochure request, before the website content
pub fn brochure_request_preamble(company_name: &str, main_url: &str) -> String {
    let mut message = format!(
        "Alright, master copywriter, here's the company we're focusing on: **{company_name}**.\n"
    );
    message.push_str(&format!(
        "I've diligently gathered all the relevant content from its website (starting at {main_url}) "
    ));
    message.push_str(
        "and its key sub-pages. Please use this information to craft that amazing, concise, and professional brochure, ",
    );
    message.push_str("following all the guidelines we discussed.\n\n");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_request_lists_every_link() {
        let links = vec![
            "https://x.test/about".to_string(),
            "https://x.test/careers".to_string(),
        ];
        let message = link_request_message("https://x.test", &links);
        assert!(message.starts_with("Okay, AI expert, I've just visited **https://x.test**.\n"));
        assert!(message.ends_with("Here are the links:\nhttps://x.test/about\nhttps://x.test/careers"));
    }

    #[test]
    fn test_brochure_preamble_names_company_and_source() {
        let message = brochure_request_preamble("Acme", "https://acme.test");
        assert!(message.contains("**Acme**"));
        assert!(message.contains("(starting at https://acme.test)"));
        assert!(message.ends_with("\n\n"));
    }

    #[test]
    fn test_tone_selects_instructions() {
        assert!(brochure_instructions(BrochureTone::Professional).contains("Markdown format"));
        assert!(brochure_instructions(BrochureTone::Humorous).contains("stand-up comedian"));
        assert!(LINK_FILTER_INSTRUCTIONS.contains(r#""links": ["#));
    }
}
