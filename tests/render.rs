use markup::render;

const ALLOWED_TAGS: [&str; 11] = ["p", "ul", "ol", "li", "strong", "em", "u", "s", "mark", "span", "a"];

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "plain",
    "* a\n* b\n1. c\n2. d\n\nafter",
    "N(I(S(T(x))))",
    "M(red,N(x)) C(blue, I(y))",
    "N(( ) ) url() url(url(x))",
    "<script>alert('x')</script>",
    "C(\"><img src=x onerror=alert(1)>,boom)",
    "url(\"><iframe>)",
    "* \n1. \n* N(",
    "M(,) C(,) M( , ) C(a,)",
    "\u{2028}ünïcödé N(ñ) 12. 3. * *",
    "\r\n\r\n* a\r\n  2.\tb\r\n",
];

/// Names of every opening and closing tag in `html`, in order.
fn tags(html: &str) -> Vec<(bool, String)> {
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let (closing, after) = match after.strip_prefix('/') {
            Some(after) => (true, after),
            None => (false, after),
        };
        let name: String = after
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        found.push((closing, name));
        rest = after;
    }
    found
}

#[test]
fn only_known_tags_are_emitted() {
    for sample in SAMPLES {
        for (_, name) in tags(&render(sample)) {
            assert!(
                ALLOWED_TAGS.contains(&name.as_str()),
                "unexpected tag {name:?} rendering {sample:?}"
            );
        }
    }
}

#[test]
fn tags_are_balanced_and_lists_are_flat() {
    for sample in SAMPLES {
        let html = render(sample);
        let mut stack: Vec<String> = Vec::new();
        for (closing, name) in tags(&html) {
            if closing {
                assert_eq!(stack.pop().as_deref(), Some(name.as_str()), "in {html:?}");
            } else {
                if name == "ul" || name == "ol" {
                    assert!(
                        !stack.iter().any(|open| open == "ul" || open == "ol"),
                        "nested list in {html:?}"
                    );
                }
                stack.push(name);
            }
        }
        assert!(stack.is_empty(), "unclosed {stack:?} in {html:?}");
    }
}

#[test]
fn blank_input_renders_nothing() {
    assert_eq!(render(""), "");
    assert_eq!(render("   "), "");
    assert_eq!(render("\t\n  \n"), "");
}

#[test]
fn rendering_is_repeatable() {
    for sample in SAMPLES {
        assert_eq!(render(sample), render(sample));
    }
}

#[test]
fn list_groups_follow_contiguity() {
    // Moving paragraphs around never merges or splits the list groups
    let a = render("intro\n* a\n* b\noutro");
    let b = render("outro\n* a\n* b\nintro");
    assert_eq!(a.matches("<ul>").count(), 1);
    assert_eq!(b.matches("<ul>").count(), 1);
    assert_eq!(render("* a\n\n* b").matches("<ul>").count(), 2);
}

#[test]
fn mixed_document() {
    let text = "Resumen N(urgente)\n\n* paso S(uno)\n* paso T(dos)\n1. M(#ff0,revisar)\nver url(https://x.y)";
    assert_eq!(
        render(text),
        concat!(
            "<p>Resumen <strong>urgente</strong></p>",
            "<ul><li>paso <u>uno</u></li><li>paso <s>dos</s></li></ul>",
            "<ol><li><mark style=\"background-color:#ff0;\">revisar</mark></li></ol>",
            "<p>ver <a href=\"https://x.y\" target=\"_blank\" class=\"text-indigo-600 hover:underline\">https://x.y</a></p>",
        )
    );
}

#[test]
fn later_markers_see_earlier_output() {
    assert_eq!(
        render("C(#00f, N(a) and S(b))"),
        "<p><span style=\"color:#00f\"><strong>a</strong> and <u>b</u></span></p>"
    );
    assert_eq!(
        render("* M(red,T(old)) I(x N(y))"),
        concat!(
            "<ul><li><mark style=\"background-color:red;\"><s>old</s></mark> ",
            "<em>x <strong>y</strong></em></li></ul>",
        )
    );
}
