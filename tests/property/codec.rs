//! Block and tree files decode back to what was written, and decoders never
//! panic on arbitrary input.

use proptest::prelude::*;
use quarry::storage::encoding::{decode_varint, encode_varint};
use quarry::storage::{decode_block, encode_block};
use quarry::{BlockTree, Corpus};

use super::strategies::{collection, tokens_of};

fn corpus_of(collection: &[Vec<String>]) -> Corpus {
    let mut corpus = Corpus::new(3);
    corpus.index_tokens(&tokens_of(collection));
    corpus.compute_statistics();
    corpus
}

proptest! {
    #[test]
    fn prop_block_roundtrip(collection in collection(), compressed in any::<bool>()) {
        let postings = corpus_of(&collection).into_postings();
        let bytes = encode_block(&postings, compressed).unwrap();
        prop_assert_eq!(decode_block(&bytes).unwrap(), postings);
    }

    #[test]
    fn prop_tree_roundtrip(
        collection in collection(),
        per_block in 1usize..5,
        compressed in any::<bool>(),
    ) {
        let corpus = corpus_of(&collection);
        let docs = collection.len();
        let (postings, table) = corpus.into_parts();

        let mut tree = BlockTree::new(docs, table);
        let terms: Vec<&String> = postings.keys().collect();
        for (i, chunk) in terms.chunks(per_block).enumerate() {
            tree.add_block(format!("{i:05}.blk"), chunk.iter().copied());
        }

        let decoded = BlockTree::decode(&tree.encode(compressed).unwrap()).unwrap();
        prop_assert_eq!(decoded.term_count(), postings.len());
        prop_assert_eq!(decoded.docs_num(), docs);
        prop_assert_eq!(decoded.documents(), tree.documents());
        for term in postings.keys() {
            prop_assert_eq!(decoded.block_for(term), tree.block_for(term));
        }
    }

    #[test]
    fn prop_block_decoder_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_block(&bytes);
        let _ = BlockTree::decode(&bytes);
    }

    #[test]
    fn prop_varint_roundtrip(value in any::<u64>()) {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        prop_assert_eq!(decode_varint(&buf).unwrap(), (value, buf.len()));
    }
}
