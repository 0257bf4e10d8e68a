use super::{Header, Question, ResourceRecord};

/// A decoded DNS message. Authority and additional sections are not modeled;
/// only their counts travel on the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    /// A standard query carrying the given questions.
    pub fn query(id: u16, questions: Vec<Question>) -> Self {
        let header = Header {
            question_count: questions.len() as u16,
            ..Header::query(id)
        };
        Self {
            header,
            questions,
            answers: Vec::new(),
        }
    }

    /// Builds a query that asks only `question`, keeping this message's id and
    /// flags. The response bit is always cleared. The result carries no answer,
    /// authority or additional records, so all counts but the question count
    /// are zero.
    pub fn single_question(&self, question: &Question) -> Message {
        Message {
            header: Header {
                is_response: false,
                question_count: 1,
                answer_count: 0,
                authority_count: 0,
                additional_count: 0,
                ..self.header
            },
            questions: vec![question.clone()],
            answers: Vec::new(),
        }
    }
}
