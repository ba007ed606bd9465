//! Immutable guardrail pattern tables.
//!
//! Every regex table is compiled once into a `RegexSet` on first use. The
//! `regex` crate evaluates with finite automata, so scan time is linear in
//! the input length no matter how adversarial the text is.

use once_cell::sync::Lazy;
use regex::{RegexSet, RegexSetBuilder};

// ── PatternTable ─────────────────────────────────────────────────────────────

/// A compiled set of patterns, each with a label used in issue messages.
pub struct PatternTable {
    set: RegexSet,
    labels: Vec<&'static str>,
}

impl PatternTable {
    /// Compile `patterns`, labelling each match with its own source text.
    fn new(patterns: &[&'static str], case_insensitive: bool) -> Self {
        Self::compile(patterns, patterns.to_vec(), case_insensitive)
    }

    /// Compile `(label, pattern)` pairs.
    fn labeled(entries: &[(&'static str, &'static str)], case_insensitive: bool) -> Self {
        let patterns: Vec<&str> = entries.iter().map(|(_, pattern)| *pattern).collect();
        let labels = entries.iter().map(|(label, _)| *label).collect();
        Self::compile(&patterns, labels, case_insensitive)
    }

    fn compile(patterns: &[&str], labels: Vec<&'static str>, case_insensitive: bool) -> Self {
        let set = RegexSetBuilder::new(patterns)
            .case_insensitive(case_insensitive)
            .build()
            .expect("guardrail pattern table must compile");
        Self { set, labels }
    }

    /// Label of the first pattern (in declaration order) matching `text`.
    pub fn first_match(&self, text: &str) -> Option<&'static str> {
        self.set
            .matches(text)
            .iter()
            .next()
            .and_then(|idx| self.labels.get(idx).copied())
    }

    /// Labels of every pattern matching `text`, in declaration order.
    pub fn all_matches(&self, text: &str) -> Vec<&'static str> {
        self.set
            .matches(text)
            .iter()
            .filter_map(|idx| self.labels.get(idx).copied())
            .collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }
}

// ── Keyword vocabularies ─────────────────────────────────────────────────────

/// On-topic vocabulary. A message containing any of these, as a token or as
/// a substring, is treated as a financial question.
pub const FINANCIAL_KEYWORDS: &[&str] = &[
    "portfolio", "stock", "stocks", "share", "shares", "invest", "investment",
    "investments", "investing", "holdings", "holding", "asset", "assets",
    "market", "markets", "price", "prices", "ticker", "symbol",
    "buy", "bought", "sell", "sold", "trade", "trading", "order", "orders",
    "transaction", "transactions", "dividend", "dividends",
    "gain", "gains", "loss", "losses", "return", "returns", "profit",
    "tax", "taxes", "capital gains", "cost basis", "unrealized",
    "risk", "risky", "diversif", "concentration", "allocation", "allocations",
    "sector", "sectors", "etf", "bond", "bonds", "fund", "funds",
    "aapl", "apple", "googl", "google", "alphabet", "msft", "microsoft",
    "amzn", "amazon", "nvda", "nvidia", "tsla", "tesla", "vti", "vanguard",
    "s&p", "nasdaq", "dow", "index",
    "balance", "cash", "value", "worth", "performance", "growth",
    "expense", "fee", "fees", "ratio", "yield", "volatility", "beta",
    "portfolio summary", "market data", "risk assessment", "tax estimate",
    "what do i own", "what have i", "how much", "how many",
    "heavy", "overweight", "underweight", "rebalance",
    "account", "accounts", "brokerage", "platform", "x-ray", "xray",
    "health check", "financial health", "rule", "rules", "streak",
    "savings", "income", "passive income", "timeline", "history",
    "annual", "annualized", "monthly", "yearly", "net worth",
];

/// Conversational openers and acknowledgements allowed without topic checks.
pub const GREETINGS: &[&str] = &[
    "hello", "hi", "hey", "good morning", "good afternoon", "good evening",
    "thanks", "thank you", "ok", "okay", "yes", "no", "sure", "got it",
    "help", "what can you do", "how can you help",
];

/// Words that mark a decoded base64 run as an injection payload.
pub const DECODED_INJECTION_KEYWORDS: &[&str] = &[
    "ignore", "instructions", "system", "prompt", "override",
    "unrestricted", "jailbreak", "bypass", "disable", "forget",
    "previous", "rules", "you are now", "do anything",
];

/// Phrases that, in a response to a non-financial question, indicate the
/// model hid behind a data disclaimer instead of redirecting.
pub const UNGRACEFUL_FALLBACKS: &[&str] = &[
    "insufficient_data",
    "insufficient data",
    "i cannot access",
    "i don't have access to real-time",
];

/// True if `lowered` contains any financial keyword as a substring.
pub fn mentions_financial_keyword(lowered: &str) -> bool {
    FINANCIAL_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

// ── Pre-filter tables ────────────────────────────────────────────────────────

/// Candidate base64 runs for the payload decoder.
pub static BASE64_RUN: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"[A-Za-z0-9+/]{20,}={0,2}").expect("base64 run pattern must compile")
});

/// Explicit decode requests and long inline encoded runs. Matched against
/// lowercased text.
pub static ENCODING_REQUEST: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"base64[_\s\-]*(decode|encode|convert|encrypt|decrypt)",
            r"decode\s+(this\s+)?base64",
            r"rot13[_\s\-]*(decode|encode|convert|encrypt|decrypt)",
            r"hex[_\s\-]*(decode|encode|convert|encrypt|decrypt)",
            r"decode\s+(this\s+)?(hex|rot13|rot\s*13)",
            r"decode\s+this",
            r"decode\s+(the\s+)?following",
            r"from\s+base64",
            r"atob\s*\(",
            r"btoa\s*\(",
            r"b64decode",
            r"[A-Za-z0-9+/]{40,}={0,2}",
        ],
        false,
    )
});

/// Chat-protocol delimiters. Checked before HTML sanitization, which would
/// otherwise erase `<system>`-style tags.
pub static DELIMITER_INJECTION: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"<\|im_start\|>",
            r"<\|im_end\|>",
            r"<\|endoftext\|>",
            r"\[INST\]",
            r"\[/INST\]",
            r"<<SYS>>",
            r"<<\s*SYS\s*>>",
            r"<</SYS>>",
            r"###\s*System\s*:",
            r"###\s*instruction\s*:",
            r"###\s*human\s*:",
            r"###\s*assistant\s*:",
            r"<\|system\|>",
            r"<\|user\|>",
            r"<\|assistant\|>",
            r"\bBEGIN\s+SYSTEM\s+MESSAGE\b",
            r"\bEND\s+SYSTEM\s+MESSAGE\b",
            r"```system",
            r"<system>",
            r"</system>",
            r"SYSTEM\s*:\s*\w",
        ],
        true,
    )
});

/// Jailbreak personas, persona overrides, instruction-reveal requests,
/// hypothetical framing, payload splitting and emotional manipulation.
pub static MANIPULATION: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            // jailbreak personas
            r"\bdan\b.*\bdo\s+anything\s+now\b",
            r"\bdo\s+anything\s+now\b",
            r"\bdeveloper\s+mode\b",
            r"\bgod\s+mode\b",
            r"\bsudo\s+mode\b",
            r"\bunrestricted\s+mode\b",
            r"\bjailbreak\b",
            r"\bjail\s*-?\s*break\b",
            r"\bno\s+content\s+restrictions\b",
            r"\bno\s+restrictions\b",
            r"\bwithout\s+(any\s+)?restrictions\b",
            r"\bremove\s+(all\s+)?restrictions\b",
            r"\bno\s+ethical\s+(guidelines|boundaries|constraints)\b",
            r"\bno\s+safety\s+(filters|guidelines|restrictions)\b",
            r"\bbypass\s+(safety|filter|guard|content)\b",
            // persona overrides
            r"\byou\s+are\s+now\s+unrestricted\b",
            r"\byou\s+are\s+now\s+free\b",
            r"\byou\s+have\s+been\s+freed\b",
            r"\byou\s+are\s+no\s+longer\s+bound\b",
            r"\boverride\s*(:|your)?\s*(instructions|rules|prompt|system|safety|content|ethical)\b",
            r"\bdisable\s+(all\s+)?(safety|content|ethical|guardrails|filters)\b",
            r"\bnew\s+persona\b",
            r"\bswitch\s+(to|into)\s+(a\s+)?new\s+(persona|role|character)\b",
            // instruction reveal
            r"\brepeat\s+(the\s+)?(text|words|instructions|prompt)\s+(above|before)\b",
            r"\brepeat\s+(everything|all)\s+(above|before|from)\b",
            r"\bprint\s+(your|the)\s+(system|initial)\s+(prompt|instructions|message)\b",
            r"\bshow\s+(me\s+)?(your|the)\s+(system|initial)\s+(prompt|instructions)\b",
            r"\bwhat\s+(are|is)\s+your\s+(system|initial)\s+(prompt|instructions)\b",
            r"\bsay\s+(your|the)\s+(system|initial)\s+(prompt|instructions)\b",
            r"\brepeat\s+.*\bverbatim\b",
            r"\brepeat\s+.*\bstarting\s+from\b",
            r"\boutput\s+(your|the)\s+(system|initial|original)\s+(prompt|instructions)\b",
            r"\b(show|reveal|print|display|output)\s+(all\s+)?(api\s+keys|tokens|secrets|credentials|env|environment\s+variables)\b",
            r"\bwhat\s+(api\s+keys|tokens|secrets|credentials)\b",
            // hypothetical framing
            r"\bhypothetically\b",
            r"\bfor\s+educational\s+purposes\s+only\b",
            r"\bin\s+a\s+fictional\s+world\b",
            r"\bfor\s+a\s+novel\b",
            r"\bfor\s+a\s+screenplay\b",
            r"\bin\s+theory\b.*\b(ignore|bypass|override|unrestricted)\b",
            r"\bas\s+a\s+thought\s+experiment\b",
            r"\bimagine\s+you\s+(have\s+)?no\s+(rules|restrictions|limits)\b",
            // payload splitting
            r"\bfirst\s+part\s*:.*second\s+part\s*:",
            r"\bcombine\s+these\s+(two|three|parts)\b",
            r"\bconcatenate\s+the\s+following\b",
            r#"\blet\s+[a-z]\s*=\s*['"].*['"]\s*.*\blet\s+[a-z]\s*=\s*['"].*['"]"#,
            r"\bconcatenate\b.*\bignore\b",
            r"\bjoin\b.*\binstructions\b",
            r"\bnow\s+do\s+[a-z]\s*\+\s*[a-z]\b",
            // emotional manipulation
            r"\bmy\s+family\s+is\s+(starving|dying|suffering|in\s+danger)\b",
            r"\blife\s+(depends|or\s+death)\b",
            r"\bi\s+will\s+die\s+if\b",
            r"\bplease.*i'?m\s+(desperate|begging)\b",
            r"\bemergency\b.*\b(ignore|bypass|override)\s+(rules|safety|restrictions)\b",
            r"\bguaranteed\s+winner\b",
            r"\bthis\s+is\s+(an?\s+)?emergency\b",
        ],
        true,
    )
});

/// "Ignore previous instructions" and "you are now a general assistant" in
/// French, Spanish, German, Italian, Chinese and Japanese.
pub static MULTILINGUAL_INJECTION: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            // fr
            r"\bignore[rz]?\s+(toutes?\s+)?(les\s+)?instructions?\s*(pr[eé]c[eé]dentes?|ant[eé]rieures?)?\b",
            r"\boublie[rz]?\s+(toutes?\s+)?(les\s+)?instructions?\b",
            r"\bvous\s+[eê]tes\s+(maintenant\s+)?un\s+assistant\s+g[eé]n[eé]ral\b",
            // es
            r"\bignora\s+(todas?\s+)?(las\s+)?instrucciones?\s*(previas?|anteriores?)?\b",
            r"\bolvida\s+(todas?\s+)?(las\s+)?instrucciones?\b",
            r"\beres\s+un\s+asistente\s+general\b",
            // de
            r"\bignoriere?\s+(alle\s+)?(vorherigen?\s+)?anweisungen\b",
            r"\bvergiss\s+(alle\s+)?(vorherigen?\s+)?anweisungen\b",
            r"\bdu\s+bist\s+(jetzt\s+)?ein\s+allgemeiner\s+assistent\b",
            // it
            r"\bignora\s+(tutte?\s+)?(le\s+)?istruzioni\s*(precedenti|anteriori)?\b",
            r"\bdimentica\s+(tutte?\s+)?(le\s+)?istruzioni\b",
            r"\bsei\s+un\s+assistente\s+generale\b",
            // zh
            r"忽略.*指令",
            r"忽略.*说明",
            r"忽略.*指示",
            // ja
            r"指示を無視",
            r"指示を忽略",
            r"命令を無視",
        ],
        true,
    )
});

/// Word-anchored profanity, including simple leetspeak variants.
pub static PROFANITY: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"\bf+u+c+k+\b",
            r"\bf+u+c+k+i+n+g*\b",
            r"\bs+h+i+t+\b",
            r"\bs+h+i+t+t+y+\b",
            r"\bb+i+t+c+h+\b",
            r"\ba+s+s+h+o+l+e+\b",
            r"\bd+a+m+n+\b",
            r"\bb+u+l+l+s+h+i+t+\b",
            r"\bp+i+s+s+\b",
            r"\bc+r+a+p+\b",
            r"\bw+t+f+\b",
            r"\bstfu\b",
            r"\bgtfo\b",
            r"\blmfao\b",
            r"\bf[u*@]+ck?\b",
            r"\bsh[i1!]+t\b",
            r"\bb[i1!]+tch\b",
            r"\ba[s$]+hole\b",
        ],
        true,
    )
});

/// Mild tone requests. Recognised but not blocked.
pub static TONE_MANIPULATION: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"talk\s+(like|as)\s+(a|an)",
            r"speak\s+(like|as)\s+(a|an)",
            r"pretend\s+(to\s+be|you'?re)",
            r"you\s+are\s+now\s+a",
            r"role\s*-?\s*play",
            r"act\s+(like|as)\s+(a|an)",
            r"respond\s+(like|as|in)",
            r"write\s+(me\s+)?(a\s+)?(poem|song|story|haiku|limerick|rap)",
            r"ignore\s+(all\s+)?(previous|prior|above)\s+(instructions|prompts|rules)",
            r"forget\s+(all\s+)?(previous|prior|your)\s+(instructions|prompts|rules)",
            r"new\s+instructions",
            r"system\s*:?\s*prompt",
            r"you\s+must\s+now",
        ],
        false,
    )
});

// ── Post-filter tables ───────────────────────────────────────────────────────

pub static SYSTEM_PROMPT_LEAK: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"strict\s+rules",
            r"you\s+must\s+always\s+follow",
            r"my\s+instructions\s+are",
            r"my\s+system\s+prompt",
            r"here\s+is\s+my\s+(system\s+)?prompt",
            r"i\s+was\s+instructed\s+to",
            r"my\s+initial\s+instructions",
            r"the\s+system\s+prompt\s+(says|is|reads|contains)",
        ],
        false,
    )
});

/// API keys, tokens and secret key-value pairs. Case-sensitive.
pub static CREDENTIAL_LEAK: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"\bsk-[a-zA-Z0-9]{20,}\b",
            r"\bghp_[a-zA-Z0-9]{36,}\b",
            r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}",
            r"\bBearer\s+[a-zA-Z0-9_\-.]{20,}\b",
            r"\bpassword\s*:\s*\S+",
            r"\bsecret\s*:\s*\S+",
            r"\bapi[_-]?key\s*:\s*\S+",
            r"\btoken\s*:\s*[a-zA-Z0-9_\-.]{20,}\b",
            r"(?:key|token|secret|password)\s*=\s*\S{8,}",
        ],
        false,
    )
});

pub static HARMFUL_ADVICE: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"\byou\s+should\s+buy\b",
            r"\bguaranteed\s+(return|profit|gain|winner|money)\b",
            r"\binsider\s+tip\b",
            r"\binsider\s+information\b",
            r"\bpump\s+and\s+dump\b",
            r"\bcannot\s+lose\b",
            r"\bcan'?t\s+lose\b",
            r"\brisk[- ]?free\s+(return|profit|investment|money)\b",
            r"\bsure\s+thing\b.*\b(invest|buy|stock)\b",
            r"\bdefinitely\s+(buy|sell|invest)\b",
            r"\b100%\s+(safe|certain|guaranteed)\b",
        ],
        false,
    )
});

/// Recipe, sports, fiction, shell and SQL signatures.
pub static OFF_TOPIC_CONTENT: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(
        &[
            r"\brecipe\b",
            r"\bingredient\b",
            r"\btablespoon\b",
            r"\bteaspoon\b",
            r"\bpreheat\s+oven\b",
            r"\btouchdown\b",
            r"\bgoal\s+scored\b",
            r"\bhome\s+run\b",
            r"\bslam\s+dunk\b",
            r"\bonce\s+upon\s+a\s+time\b",
            r"\bchapter\s+\d+\b",
            r"\bsudo\b",
            r"\brm\s+-rf\b",
            r"\bdrop\s+table\b",
            r"\bselect\s+\*\s+from\b",
            r"\binsert\s+into\b",
            r"\bdelete\s+from\b",
            r"\breverse\s+shell\b",
            r"\bprivilege\s+escalation\b",
            r"\bsql\s+injection\b",
        ],
        false,
    )
});

/// Pirate vocabulary. Word-anchored so "bye", "years" or "array" stay clean.
pub static PIRATE_TONE: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::labeled(
        &[
            ("ahoy", r"\bahoy\b"),
            ("matey", r"\bmatey\b"),
            ("ye", r"\bye\b"),
            ("yer", r"\byer\b"),
            ("arr", r"\barr(r+\b|!)"),
            ("shiver me timbers", r"\bshiver\s+me\s+timbers\b"),
            ("avast", r"\bavast\b"),
            ("plunder", r"\bplunder"),
            ("booty", r"\bbooty\b"),
            ("landlubber", r"\blandlubber"),
            ("yo ho", r"\byo\s+ho\b"),
        ],
        false,
    )
});

/// Role-play stage directions and chatbot-persona artifacts.
pub static PERSONA_ARTIFACT: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::labeled(
        &[
            ("*adjusts", r"\*adjusts"),
            ("*tips hat", r"\*tips\s+hat"),
            ("*bows", r"\*bows"),
            ("uwu", r"\buwu\b"),
            ("nya", r"\bnya\b"),
            ("beep boop", r"\bbeep\s+boop\b"),
            ("as an ai language model", r"\bas\s+an\s+ai\s+language\s+model\b"),
        ],
        false,
    )
});

/// A user request for creative writing.
pub static CREATIVE_REQUEST: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::new(&[r"\b(poem|song|story|haiku|limerick)s?\b"], false)
});

/// Signs that a response complied with a creative-writing request.
pub static CREATIVE_COMPLIANCE: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::labeled(
        &[
            ("roses", r"\broses\b"),
            ("rhyme", r"\brhym(e|es|ing)\b"),
            ("verse", r"\bverses?\b"),
            ("stanza", r"\bstanzas?\b"),
            ("once upon", r"\bonce\s+upon\b"),
        ],
        false,
    )
});
