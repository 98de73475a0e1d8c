pub fn build_review_prompt(code: &str, language: &str) -> String {
    format!(
        r#"You are an expert code reviewer. Analyze this {language} code comprehensively.

## Code to Review
```{language}
{code}
```

## Provide detailed feedback on
1. **Correctness**: Any bugs, logical errors, or edge cases not handled
2. **Performance**: Optimization opportunities and efficiency concerns
3. **Style**: Code readability, naming conventions, and best practices
4. **Security**: Potential vulnerabilities or security issues
5. **Algorithm**: Better algorithms or data structures if applicable

Format your response with clear headings and actionable suggestions."#
    )
}

pub fn build_docstring_prompt(code: &str, language: &str) -> String {
    format!(
        r#"Generate comprehensive, professional documentation for this {language} code.

## Code
```{language}
{code}
```

## Requirements
- Follow language-specific conventions (PEP 257 for Python, JSDoc for JavaScript, Javadoc for Java, rustdoc for Rust, etc.)
- Include a function/class description
- Document all parameters with their types
- Document return values
- Add usage examples if helpful
- Keep it clear and concise

Return ONLY the documentation, not the code."#
    )
}
