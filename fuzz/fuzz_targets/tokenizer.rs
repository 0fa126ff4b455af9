#![no_main]

use csstokenizer::*;

struct Harness {
    verbose: bool,
}

impl Harness {
    fn run(&self, data: &[u8], options: TokenizerOptions) {
        let input = CssInput::from_bytes(data);
        let mut tokenizer = Tokenizer::with_options(&input, options);
        let limit = input.as_str().chars().count() + 2;
        let mut end = 0;
        for _ in 0..limit {
            let start = tokenizer.position();
            let token = tokenizer.next_token();
            if self.verbose {
                println!("{:?} {:?}", tokenizer.slice_from(start), token);
            }
            if token == Token::EndOfInput {
                assert_eq!(start.byte_index(), input.as_str().len());
                assert_eq!(tokenizer.next_token(), Token::EndOfInput);
                return
            }
            assert_eq!(start.byte_index(), end, "spans must be contiguous");
            assert!(tokenizer.position() > start, "{:?} consumed nothing", token);
            end = tokenizer.position().byte_index();
        }
        panic!("no end of input after {} calls", limit)
    }
}

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    let harness = Harness { verbose: false };
    harness.run(data, TokenizerOptions::default());
    harness.run(data, TokenizerOptions::new().preserve_whitespace(true));
});
