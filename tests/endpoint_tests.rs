mod common;

use std::io::Write;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use common::{client, FakeTransport};
use openai_typed::legacy::{
  AnswerRequest, ClassificationRequest, EngineCompletionRequest,
  SearchRequest,
};
use openai_typed::request::PartValue;
use openai_typed::transport::HttpBody;
use openai_typed::{
  ChatMessage, ChatRequest, CompletionRequest, EditRequest, EmbeddingInput,
  EmbeddingRequest, Error, FileObject, FineTuneRequest, FineTuningStatus,
  FunctionCall, ImageData, ImageEditRequest, ImageFormat, ImageRequest,
  ImageVariationRequest, MessageContent, ModerationRequest, RunStatus,
  SpeechRequest, TranscriptFormat, TranscriptionRequest, TranslationRequest,
  Upload,
};

fn completion_body() -> serde_json::Value
{   json!({
      "id": "cmpl-1",
      "object": "text_completion",
      "created": 1680000000,
      "model": "gpt-3.5-turbo-instruct",
      "choices": [
        {"text": "hi", "index": 0, "logprobs": null, "finish_reason": "stop"}
      ],
      "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    })
}

fn expect_validation<T: std::fmt::Debug>(
  result: openai_typed::Result<T>
) -> String
{   match assert_err!(result)
    {   Error::Validation(message) => message
      , other => panic!("expected a validation error, got {:?}", other)
    }
}

// ===== Validation =====

#[tokio::test]
async fn penalty_boundaries_are_inclusive()
{   let fake = FakeTransport::json(200, completion_body());
    let client = client(fake.clone());

    let mut request = CompletionRequest::new("gpt-3.5-turbo-instruct");
    request.presence_penalty = Some(2.0);
    request.frequency_penalty = Some(-2.0);
    assert_ok!(client.create_completion(&request).await);
    assert_eq!(fake.calls(), 1);

    request.presence_penalty = Some(2.0001);
    expect_validation(client.create_completion(&request).await);
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn engine_completions_use_the_narrow_penalty_range()
{   let fake = FakeTransport::json(200, completion_body());
    let client = client(fake.clone());

    let request = EngineCompletionRequest
    {   presence_penalty: Some(1.5)
      , ..Default::default()
    };
    expect_validation(client.create_engine_completion("davinci", &request).await);
    assert_eq!(fake.calls(), 0);

    let request = EngineCompletionRequest
    {   presence_penalty: Some(1.0)
      , frequency_penalty: Some(0.0)
      , ..Default::default()
    };
    let completion = assert_ok!(
      client.create_engine_completion("davinci", &request).await
    );
    assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("stop"));
    assert_eq!(
      fake.last().url,
      "https://api.openai.com/v1/engines/davinci/completions"
    );
}

#[tokio::test]
async fn search_needs_exactly_one_document_source()
{   let fake = FakeTransport::json(200, json!({
      "object": "list",
      "data": [{"document": 0, "object": "search_result", "score": 215.4}]
    }));
    let client = client(fake.clone());

    let mut request = SearchRequest
    {   query: "the president".to_string()
      , ..Default::default()
    };
    let message = expect_validation(client.create_search("ada", &request).await);
    assert_eq!(message, "either documents or file needs to be specified");

    request.documents = Some(vec!["White House".to_string()]);
    request.file = Some("file-1".to_string());
    let message = expect_validation(client.create_search("ada", &request).await);
    assert_eq!(message, "specifying both documents and file is not allowed");
    assert_eq!(fake.calls(), 0);

    request.file = None;
    let results = assert_ok!(client.create_search("ada", &request).await);
    assert_eq!(results[0].document, 0);
    assert_eq!(fake.last_json(), json!({
      "query": "the president",
      "documents": ["White House"]
    }));
}

#[tokio::test]
async fn classification_needs_examples_or_file()
{   let fake = FakeTransport::json(200, json!({
      "completion": "cmpl-2",
      "label": "Positive",
      "model": "curie",
      "object": "classification",
      "search_model": "ada",
      "selected_examples": [
        {"document": 1, "label": "Positive", "text": "happy"}
      ]
    }));
    let client = client(fake.clone());

    let mut request = ClassificationRequest
    {   query: "It is a raining day :(".to_string()
      , ..Default::default()
    };
    expect_validation(client.create_classification("curie", &request).await);

    request.examples = Some(vec![
      ("A happy moment".to_string(), "Positive".to_string()),
    ]);
    let result = assert_ok!(
      client.create_classification("curie", &request).await
    );
    assert_eq!(result.search_model, "ada");
    assert_eq!(result.selected_examples[0].label, "Positive");

    let body = fake.last_json();
    assert_eq!(body["model"], "curie");
    assert_eq!(body["examples"], json!([["A happy moment", "Positive"]]));
    assert_eq!(
      serde_json::to_value(&result).unwrap()["searchModel"],
      "ada"
    );
}

#[tokio::test]
async fn answers_need_documents_or_file()
{   let fake = FakeTransport::json(200, json!({
      "answers": ["puppy A."],
      "completion": "cmpl-3",
      "model": "curie",
      "object": "answer",
      "search_model": "ada",
      "selected_documents": [{"document": 0, "text": "Puppy A is happy."}]
    }));
    let client = client(fake.clone());

    let mut request = AnswerRequest
    {   question: "which puppy is happy?".to_string()
      , examples: vec![
          ("What is human life expectancy?".to_string(), "78 years.".to_string()),
        ]
      , examples_context: "In 2017, U.S. life expectancy was 78.6 years."
          .to_string()
      , documents: Some(vec!["Puppy A is happy.".to_string()])
      , file: Some("file-1".to_string())
      , ..Default::default()
    };
    expect_validation(client.create_answer("curie", &request).await);
    assert_eq!(fake.calls(), 0);

    request.file = None;
    let answer = assert_ok!(client.create_answer("curie", &request).await);
    assert_eq!(answer.answers, vec!["puppy A.".to_string()]);
    assert_eq!(answer.selected_documents[0].document, 0);
    assert_eq!(fake.last().url, "https://api.openai.com/v1/answers");
}

#[tokio::test]
async fn speech_speed_is_checked()
{   let fake = FakeTransport::new(200, vec![1u8, 2, 3]);
    let client = client(fake.clone());

    let mut request = SpeechRequest
    {   model: "tts-1".to_string()
      , input: "Hello".to_string()
      , voice: "alloy".to_string()
      , speed: Some(4.5)
      , ..Default::default()
    };
    expect_validation(client.create_speech(&request).await);

    request.speed = Some(0.25);
    let audio = assert_ok!(client.create_speech(&request).await);
    assert_eq!(audio.len(), 3);
}

// ===== Optional fields and renames =====

#[tokio::test]
async fn absent_optionals_stay_off_the_wire()
{   let fake = FakeTransport::json(200, completion_body());
    let client = client(fake.clone());

    let mut request = CompletionRequest::new("gpt-3.5-turbo-instruct");
    request.prompt = Some("Say hi".into());
    request.count = Some(2);
    assert_ok!(client.create_completion(&request).await);

    assert_eq!(fake.last_json(), json!({
      "model": "gpt-3.5-turbo-instruct",
      "prompt": "Say hi",
      "n": 2
    }));
}

#[tokio::test]
async fn function_call_arguments_are_double_encoded()
{   let fake = FakeTransport::json(200, json!({
      "id": "chatcmpl-1",
      "object": "chat.completion",
      "created": 1680000000,
      "model": "gpt-4",
      "choices": [{
        "index": 0,
        "finish_reason": "function_call",
        "message": {
          "role": "assistant",
          "content": null,
          "function_call": {
            "name": "get_weather",
            "arguments": "{\"city\":\"Boston\"}"
          }
        }
      }],
      "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }));
    let client = client(fake.clone());

    let mut replayed = ChatMessage::assistant("");
    replayed.content = None;
    replayed.function_call = Some(FunctionCall
    {   name: "get_weather".to_string()
      , arguments: json!({"city": "Paris"})
    });
    let request = ChatRequest::new("gpt-4", vec![
      ChatMessage::user("Weather?"),
      replayed,
      ChatMessage::function("get_weather", "{\"temp\": 21}"),
    ]);

    let reply = assert_ok!(client.create_chat_completion(&request).await);

    let body = fake.last_json();
    assert_eq!(
      body["messages"][1]["function_call"]["arguments"],
      json!("{\"city\":\"Paris\"}")
    );
    assert_eq!(body["messages"][2]["name"], "get_weather");

    let call = reply.choices[0].message.function_call.as_ref().unwrap();
    assert_eq!(call.arguments, json!({"city": "Boston"}));
    assert_eq!(reply.usage.total_tokens, 15);
    assert_eq!(
      serde_json::to_value(&reply).unwrap()["choices"][0]["finishReason"],
      "function_call"
    );
}

#[tokio::test]
async fn malformed_function_arguments_are_a_parse_error()
{   let fake = FakeTransport::json(200, json!({
      "id": "chatcmpl-2",
      "object": "chat.completion",
      "created": 1680000000,
      "model": "gpt-4",
      "choices": [{
        "index": 0,
        "finish_reason": "function_call",
        "message": {
          "role": "assistant",
          "function_call": {"name": "f", "arguments": "{not json"}
        }
      }],
      "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    }));
    let client = client(fake);

    let request = ChatRequest::new("gpt-4", vec![ChatMessage::user("x")]);
    let err = assert_err!(client.create_chat_completion(&request).await);
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn images_decode_to_url_or_base64()
{   let fake = FakeTransport::json(200, json!({
      "created": 1680000000,
      "data": [
        {"url": "https://example.test/a.png", "revised_prompt": "a cat"},
        {"b64_json": "aGVsbG8="}
      ]
    }));
    let client = client(fake.clone());

    let images = assert_ok!(
      client.create_image(&ImageRequest::new("a cat")).await
    );
    assert_eq!(
      images.data[0].image,
      ImageData::Url("https://example.test/a.png".to_string())
    );
    assert_eq!(images.data[0].revised_prompt.as_deref(), Some("a cat"));
    assert_eq!(images.data[1].image, ImageData::Base64("aGVsbG8=".to_string()));
    assert_eq!(fake.last_json(), json!({"prompt": "a cat"}));
}

// ===== Multipart =====

#[tokio::test]
async fn upload_filename_comes_from_the_path()
{   let fake = FakeTransport::json(200, json!({
      "id": "file-1",
      "object": "file",
      "bytes": 12,
      "created_at": 1680000000,
      "filename": "ignored.jsonl",
      "purpose": "fine-tune"
    }));
    let client = client(fake.clone());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("train.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{{\"prompt\": \"a\"}}").unwrap();

    let uploaded: FileObject = assert_ok!(
      client.upload_file(Upload::from_path(&path), "fine-tune").await
    );
    assert_eq!(uploaded.created_at, 1680000000);
    assert_eq!(uploaded.status, None);

    let form = match fake.last().body
    {   Some(HttpBody::Multipart(form)) => form
      , other => panic!("expected a multipart body, got {:?}", other)
    };
    match form.get("file")
    {   Some(PartValue::File { filename, bytes }) => {
          assert_eq!(filename, "train.jsonl");
          assert_eq!(bytes, b"{\"prompt\": \"a\"}\n");
        }
      , other => panic!("unexpected file part {:?}", other)
    }
    assert_eq!(
      form.get("purpose"),
      Some(&PartValue::Text("fine-tune".to_string()))
    );
    assert!(fake.last_header("content-type").is_none());
}

#[tokio::test]
async fn raw_bytes_without_a_filename_are_rejected()
{   let fake = FakeTransport::json(200, json!({}));
    let client = client(fake.clone());

    let message = expect_validation(
      client.upload_file(Upload::from_bytes(vec![1, 2, 3]), "assistants").await
    );
    assert!(message.contains("filename"));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn missing_upload_path_is_an_io_error()
{   let fake = FakeTransport::json(200, json!({}));
    let client = client(fake.clone());

    let err = assert_err!(
      client
        .upload_file(Upload::from_path("/nonexistent/train.jsonl"), "fine-tune")
        .await
    );
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn text_transcripts_are_returned_verbatim()
{   let fake = FakeTransport::new(200, "1\n00:00:00,000 --> 00:00:01,000\nHi\n");
    let client = client(fake.clone());

    let mut request = TranscriptionRequest::new(
      Upload::from_bytes(vec![0u8; 4]).with_filename("clip.mp3"),
      "whisper-1"
    );
    request.response_format = Some(TranscriptFormat::Srt);
    request.language = Some("en".to_string());

    let transcript = assert_ok!(client.create_transcription(&request).await);
    assert!(transcript.text.ends_with("Hi\n"));
    assert!(transcript.segments.is_none());

    let form = match fake.last().body
    {   Some(HttpBody::Multipart(form)) => form
      , other => panic!("expected a multipart body, got {:?}", other)
    };
    assert_eq!(
      form.get("response_format"),
      Some(&PartValue::Text("srt".to_string()))
    );
    assert!(form.get("prompt").is_none());
}

// ===== Tagged unions =====

fn run_body(status: &str) -> serde_json::Value
{   json!({
      "id": "run_1",
      "object": "thread.run",
      "created_at": 1699000000,
      "thread_id": "thread_1",
      "assistant_id": "asst_1",
      "status": status,
      "required_action": {
        "type": "submit_tool_outputs",
        "submit_tool_outputs": {"tool_calls": [{
          "id": "call_1",
          "type": "function",
          "function": {"name": "lookup", "arguments": "{\"q\":1}"}
        }]}
      },
      "last_error": null,
      "expires_at": 1699000600,
      "started_at": 1699000001,
      "cancelled_at": null,
      "failed_at": null,
      "completed_at": null,
      "model": "gpt-4",
      "instructions": "Be brief",
      "tools": [{"type": "function", "function": {"name": "lookup"}}],
      "file_ids": [],
      "metadata": {}
    })
}

#[tokio::test]
async fn run_status_is_renamed()
{   let fake = FakeTransport::json(200, run_body("requires_action"));
    let client = client(fake.clone());

    let run = assert_ok!(client.get_run("thread_1", "run_1").await);
    assert_eq!(run.status, RunStatus::RequiresAction);

    let value = serde_json::to_value(&run).unwrap();
    assert_eq!(value["status"], "requiresAction");
    assert_eq!(value["requiredAction"]["type"], "submitToolOutputs");
    assert_eq!(
      value["requiredAction"]["submitToolOutputs"]["toolCalls"][0]["id"],
      "call_1"
    );
    assert_eq!(value["tools"][0]["type"], "function");
    assert_eq!(
      fake.last_header("openai-beta").as_deref(),
      Some("assistants=v1")
    );
}

#[tokio::test]
async fn unknown_run_status_passes_through()
{   let fake = FakeTransport::json(200, run_body("unknown_status"));
    let client = client(fake);

    let run = assert_ok!(client.get_run("thread_1", "run_1").await);
    assert_eq!(run.status, RunStatus::Other("unknown_status".to_string()));
    assert_eq!(
      serde_json::to_value(&run).unwrap()["status"],
      "unknown_status"
    );
}

#[tokio::test]
async fn tool_outputs_are_submitted_in_wire_form()
{   let fake = FakeTransport::json(200, run_body("queued"));
    let client = client(fake.clone());

    let outputs = vec![openai_typed::ToolOutput
    {   tool_call_id: "call_1".to_string()
      , output: "42".to_string()
    }];
    let run = assert_ok!(
      client.submit_tool_outputs("thread_1", "run_1", &outputs).await
    );
    assert_eq!(run.status, RunStatus::Queued);
    assert_eq!(
      fake.last().url,
      "https://api.openai.com/v1/threads/thread_1/runs/run_1/submit_tool_outputs"
    );
    assert_eq!(fake.last_json(), json!({
      "tool_outputs": [{"tool_call_id": "call_1", "output": "42"}]
    }));
}

#[tokio::test]
async fn unknown_assistant_tool_is_fatal()
{   let mut body = run_body("queued");
    body["tools"] = json!([{"type": "browser"}]);
    let fake = FakeTransport::json(200, body);
    let client = client(fake);

    let err = assert_err!(client.get_run("thread_1", "run_1").await);
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn unknown_message_content_is_fatal()
{   let fake = FakeTransport::json(200, json!({
      "id": "msg_1",
      "object": "thread.message",
      "created_at": 1699000000,
      "thread_id": "thread_1",
      "role": "assistant",
      "content": [{"type": "video", "video": {}}],
      "assistant_id": null,
      "run_id": null,
      "file_ids": []
    }));
    let client = client(fake);

    let err = assert_err!(client.get_message("thread_1", "msg_1").await);
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn message_text_decodes()
{   let fake = FakeTransport::json(200, json!({
      "object": "list",
      "data": [{
        "id": "msg_1",
        "object": "thread.message",
        "created_at": 1699000000,
        "thread_id": "thread_1",
        "role": "user",
        "content": [{"type": "text", "text": {"value": "hi", "annotations": []}}],
        "assistant_id": null,
        "run_id": null,
        "file_ids": ["file_1"]
      }],
      "first_id": "msg_1",
      "last_id": "msg_1",
      "has_more": false
    }));
    let client = client(fake);

    let page = assert_ok!(
      client.list_messages("thread_1", &Default::default()).await
    );
    assert_eq!(page.first_id.as_deref(), Some("msg_1"));
    assert_eq!(page.data[0].content[0], MessageContent::Text
    {   value: "hi".to_string()
      , annotations: vec![]
    });
    assert_eq!(page.data[0].file_ids, vec!["file_1".to_string()]);
}

#[tokio::test]
async fn fine_tuning_job_status_and_epochs()
{   let fake = FakeTransport::json(200, json!({
      "id": "ftjob-1",
      "object": "fine_tuning.job",
      "created_at": 1692661014,
      "finished_at": null,
      "model": "gpt-3.5-turbo-0613",
      "fine_tuned_model": null,
      "organization_id": "org-1",
      "status": "validating_files",
      "hyperparameters": {"n_epochs": "auto"},
      "training_file": "file-1",
      "validation_file": null,
      "result_files": [],
      "trained_tokens": null
    }));
    let client = client(fake.clone());

    let request = openai_typed::FineTuningJobRequest::new(
      "gpt-3.5-turbo-0613",
      "file-1"
    );
    let job = assert_ok!(client.create_fine_tuning_job(&request).await);
    assert_eq!(job.status, FineTuningStatus::ValidatingFiles);
    assert_eq!(
      job.hyperparameters.n_epochs,
      Some(openai_typed::Epochs::Mode("auto".to_string()))
    );
    assert_eq!(fake.last_json(), json!({
      "training_file": "file-1",
      "model": "gpt-3.5-turbo-0613"
    }));
    assert_eq!(
      serde_json::to_value(&job).unwrap()["status"],
      "validatingFiles"
    );
}

// ===== JSON mappers =====

#[tokio::test]
async fn embeddings_round_trip()
{   let fake = FakeTransport::json(200, json!({
      "object": "list",
      "model": "text-embedding-ada-002",
      "data": [{"index": 0, "object": "embedding", "embedding": [0.5, -0.25]}],
      "usage": {"prompt_tokens": 3, "total_tokens": 3}
    }));
    let client = client(fake.clone());

    let request = EmbeddingRequest::new("text-embedding-ada-002", "hello");
    let embeddings = assert_ok!(client.create_embeddings(&request).await);
    assert_eq!(fake.last().url, "https://api.openai.com/v1/embeddings");
    assert_eq!(fake.last_json(), json!({
      "model": "text-embedding-ada-002",
      "input": "hello"
    }));
    assert_eq!(embeddings.data[0].embedding, vec![0.5, -0.25]);
    assert_eq!(
      serde_json::to_value(&embeddings.usage).unwrap(),
      json!({"promptTokens": 3, "totalTokens": 3})
    );

    let tokens = EmbeddingRequest
    {   input: EmbeddingInput::Tokens(vec![vec![1, 2], vec![3]])
      , user: Some("u-1".to_string())
      , ..request
    };
    assert_ok!(client.create_embeddings(&tokens).await);
    assert_eq!(fake.last_json(), json!({
      "model": "text-embedding-ada-002",
      "input": [[1, 2], [3]],
      "user": "u-1"
    }));
}

fn categories<T: serde::Serialize>(flag: T, other: T) -> serde_json::Value
{   json!({
      "hate": other,
      "hate/threatening": flag,
      "self-harm": other,
      "sexual": other,
      "sexual/minors": other,
      "violence": other,
      "violence/graphic": other
    })
}

#[tokio::test]
async fn moderation_categories_keep_their_keys()
{   let fake = FakeTransport::json(200, json!({
      "id": "modr-1",
      "model": "text-moderation-006",
      "results": [{
        "flagged": true,
        "categories": categories(true, false),
        "category_scores": categories(0.9, 0.01)
      }]
    }));
    let client = client(fake.clone());

    let moderations = assert_ok!(
      client.create_moderation(&ModerationRequest::new("some text")).await
    );
    assert_eq!(fake.last().url, "https://api.openai.com/v1/moderations");
    assert_eq!(fake.last_json(), json!({"input": "some text"}));

    let result = &moderations.results[0];
    assert!(result.flagged);
    assert!(result.categories.hate_threatening);
    assert!(!result.categories.self_harm);
    assert_eq!(result.category_scores.hate_threatening, 0.9);

    let value = serde_json::to_value(&moderations).unwrap();
    assert_eq!(value["results"][0]["categories"]["hate/threatening"], true);
    assert_eq!(value["results"][0]["categories"]["self-harm"], false);
    assert_eq!(
      value["results"][0]["categoryScores"]["violence/graphic"],
      0.01
    );
}

#[tokio::test]
async fn edit_count_is_sent_as_n()
{   let fake = FakeTransport::json(200, json!({
      "object": "edit",
      "created": 1589478378,
      "choices": [{"text": "What day of the week is it?", "index": 0}],
      "usage": {"prompt_tokens": 25, "completion_tokens": 32, "total_tokens": 57}
    }));
    let client = client(fake.clone());

    let request = EditRequest
    {   model: "text-davinci-edit-001".to_string()
      , input: Some("What day of the wek is it?".to_string())
      , instruction: "Fix the spelling mistakes".to_string()
      , count: Some(2)
      , ..Default::default()
    };
    let edit = assert_ok!(client.create_edit(&request).await);
    assert_eq!(fake.last().url, "https://api.openai.com/v1/edits");
    assert_eq!(fake.last_json(), json!({
      "model": "text-davinci-edit-001",
      "input": "What day of the wek is it?",
      "instruction": "Fix the spelling mistakes",
      "n": 2
    }));
    assert_eq!(edit.choices[0].text, "What day of the week is it?");
    assert_eq!(edit.usage.completion_tokens, Some(32));
    assert_eq!(
      serde_json::to_value(&edit).unwrap()["usage"]["totalTokens"],
      57
    );
}

// ===== Multipart mappers =====

fn images_body() -> serde_json::Value
{   json!({"created": 1700000000, "data": [{"b64_json": "aGk="}]})
}

fn form(fake: &FakeTransport) -> openai_typed::MultipartForm
{   match fake.last().body
    {   Some(HttpBody::Multipart(form)) => form
      , other => panic!("expected a multipart body, got {:?}", other)
    }
}

#[tokio::test]
async fn image_edit_uploads_image_and_mask()
{   let fake = FakeTransport::json(200, images_body());
    let client = client(fake.clone());

    let mut request = ImageEditRequest::new(
      Upload::from_bytes(vec![1u8, 2, 3]).with_filename("cat.png"),
      "add a hat"
    );
    request.mask = Some(Upload::from_bytes(vec![9u8]).with_filename("mask.png"));
    request.count = Some(2);
    request.response_format = Some(ImageFormat::Base64Json);

    let images = assert_ok!(client.create_image_edit(&request).await);
    assert_eq!(images.data[0].image, ImageData::Base64("aGk=".to_string()));
    assert_eq!(fake.last().url, "https://api.openai.com/v1/images/edits");

    let form = form(&fake);
    assert_eq!(form.get("image"), Some(&PartValue::File
    {   filename: "cat.png".to_string()
      , bytes: vec![1, 2, 3]
    }));
    assert_eq!(form.get("mask"), Some(&PartValue::File
    {   filename: "mask.png".to_string()
      , bytes: vec![9]
    }));
    assert_eq!(
      form.get("prompt"),
      Some(&PartValue::Text("add a hat".to_string()))
    );
    assert_eq!(form.get("n"), Some(&PartValue::Text("2".to_string())));
    assert_eq!(
      form.get("response_format"),
      Some(&PartValue::Text("b64_json".to_string()))
    );
    assert!(form.get("size").is_none());
}

#[tokio::test]
async fn image_edit_mask_without_filename_is_rejected()
{   let fake = FakeTransport::json(200, images_body());
    let client = client(fake.clone());

    let mut request = ImageEditRequest::new(
      Upload::from_bytes(vec![1u8]).with_filename("cat.png"),
      "add a hat"
    );
    request.mask = Some(Upload::from_bytes(vec![9u8]));

    let message = expect_validation(client.create_image_edit(&request).await);
    assert!(message.contains("filename"));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn image_variation_uploads_the_image()
{   let fake = FakeTransport::json(200, images_body());
    let client = client(fake.clone());

    let mut request = ImageVariationRequest::new(
      Upload::from_bytes(vec![7u8]).with_filename("dog.png")
    );
    request.size = Some("256x256".to_string());

    assert_ok!(client.create_image_variation(&request).await);
    assert_eq!(
      fake.last().url,
      "https://api.openai.com/v1/images/variations"
    );
    let form = form(&fake);
    assert_eq!(form.get("image"), Some(&PartValue::File
    {   filename: "dog.png".to_string()
      , bytes: vec![7]
    }));
    assert_eq!(
      form.get("size"),
      Some(&PartValue::Text("256x256".to_string()))
    );
    assert!(form.get("prompt").is_none());
}

#[tokio::test]
async fn verbose_translation_segments_are_renamed()
{   let fake = FakeTransport::json(200, json!({
      "task": "translate",
      "language": "german",
      "duration": 1.5,
      "text": "Hello",
      "segments": [{
        "id": 0,
        "seek": 0,
        "start": 0.0,
        "end": 1.5,
        "text": "Hello",
        "tokens": [50364, 2425],
        "temperature": 0.0,
        "avg_logprob": -0.25,
        "compression_ratio": 0.5,
        "no_speech_prob": 0.125
      }]
    }));
    let client = client(fake.clone());

    let mut request = TranslationRequest::new(
      Upload::from_bytes(vec![0u8; 4]).with_filename("clip.mp3"),
      "whisper-1"
    );
    request.response_format = Some(TranscriptFormat::VerboseJson);

    let transcript = assert_ok!(client.create_translation(&request).await);
    assert_eq!(
      fake.last().url,
      "https://api.openai.com/v1/audio/translations"
    );
    let form = form(&fake);
    assert_eq!(
      form.get("model"),
      Some(&PartValue::Text("whisper-1".to_string()))
    );
    assert_eq!(
      form.get("response_format"),
      Some(&PartValue::Text("verbose_json".to_string()))
    );

    assert_eq!(transcript.language.as_deref(), Some("german"));
    let segments = transcript.segments.clone().unwrap();
    assert_eq!(segments[0].avg_logprob, -0.25);

    let value = serde_json::to_value(&transcript).unwrap();
    let segment = &value["segments"][0];
    assert_eq!(segment["avgLogprob"], -0.25);
    assert_eq!(segment["compressionRatio"], 0.5);
    assert_eq!(segment["noSpeechProb"], 0.125);
    assert!(segment.get("avg_logprob").is_none());
}

#[tokio::test]
async fn translation_temperature_is_checked()
{   let fake = FakeTransport::json(200, json!({"text": "Hello"}));
    let client = client(fake.clone());

    let mut request = TranslationRequest::new(
      Upload::from_bytes(vec![0u8]).with_filename("clip.mp3"),
      "whisper-1"
    );
    request.temperature = Some(1.5);
    expect_validation(client.create_translation(&request).await);
    assert_eq!(fake.calls(), 0);
}

// ===== Fine-tuning =====

fn fine_tune_body() -> serde_json::Value
{   json!({
      "id": "ft-1",
      "object": "fine-tune",
      "created_at": 1614807352,
      "updated_at": 1614807352,
      "model": "curie",
      "fine_tuned_model": null,
      "organization_id": "org-1",
      "status": "pending",
      "hyperparams": {"n_epochs": 4, "batch_size": null},
      "training_files": [{
        "id": "file-1",
        "object": "file",
        "bytes": 1547276,
        "created_at": 1610062281,
        "filename": "train.jsonl",
        "purpose": "fine-tune"
      }],
      "validation_files": [],
      "result_files": [],
      "events": [{
        "object": "fine-tune-event",
        "created_at": 1614807352,
        "level": "info",
        "message": "Job enqueued"
      }]
    })
}

#[tokio::test]
async fn fine_tune_fields_are_renamed_on_the_wire()
{   let fake = FakeTransport::json(200, fine_tune_body());
    let client = client(fake.clone());

    let request = FineTuneRequest
    {   model: Some("curie".to_string())
      , epochs: Some(4)
      , learning_rate: Some(0.1)
      , loss_weight: Some(0.01)
      , classification_classes: Some(3)
      , ..FineTuneRequest::new("file-1")
    };
    let fine_tune = assert_ok!(client.create_fine_tune(&request).await);
    assert_eq!(fake.last().url, "https://api.openai.com/v1/fine-tunes");
    assert_eq!(fake.last_json(), json!({
      "training_file": "file-1",
      "model": "curie",
      "n_epochs": 4,
      "learning_rate_multiplier": 0.1,
      "prompt_loss_weight": 0.01,
      "classification_n_classes": 3
    }));

    assert_eq!(fine_tune.training_files[0].filename, "train.jsonl");
    assert_eq!(fine_tune.events[0].message, "Job enqueued");
    let value = serde_json::to_value(&fine_tune).unwrap();
    assert_eq!(value["organizationId"], "org-1");
    assert_eq!(value["trainingFiles"][0]["createdAt"], 1610062281);
    assert_eq!(value["hyperparams"]["n_epochs"], 4);
}

#[tokio::test]
async fn fine_tune_events_are_listed()
{   let fake = FakeTransport::json(200, json!({
      "object": "list",
      "data": [
        {"object": "fine-tune-event", "created_at": 1614807352,
         "level": "info", "message": "Job enqueued"},
        {"object": "fine-tune-event", "created_at": 1614807356,
         "level": "info", "message": "Job started."}
      ]
    }));
    let client = client(fake.clone());

    let events = assert_ok!(client.list_fine_tune_events("ft-1").await);
    assert_eq!(
      fake.last().url,
      "https://api.openai.com/v1/fine-tunes/ft-1/events"
    );
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].message, "Job started.");
    assert_eq!(
      serde_json::to_value(&events[0]).unwrap()["createdAt"],
      1614807352
    );
}

#[tokio::test]
async fn fine_tuning_events_carry_metrics()
{   let fake = FakeTransport::json(200, json!({
      "object": "list",
      "data": [{
        "object": "fine_tuning.job.event",
        "id": "ftevent-1",
        "created_at": 1692407401,
        "level": "info",
        "message": "Step 10/100: training loss=0.52",
        "data": {"step": 10, "train_loss": 0.5, "train_mean_token_accuracy": 0.75},
        "type": "metrics"
      }],
      "has_more": true
    }));
    let client = client(fake.clone());

    let page = assert_ok!(
      client
        .list_fine_tuning_events("ftjob-1", Some("ftevent-0"), Some(5))
        .await
    );
    assert_eq!(
      fake.last().url,
      "https://api.openai.com/v1/fine_tuning/jobs/ftjob-1/events?after=ftevent-0&limit=5"
    );
    assert!(page.has_more);
    let metrics = page.data[0].data.clone().unwrap();
    assert_eq!(metrics.step, 10);
    assert_eq!(metrics.valid_loss, None);

    let value = serde_json::to_value(&page.data[0]).unwrap();
    assert_eq!(value["type"], "metrics");
    assert_eq!(value["data"]["trainLoss"], 0.5);
    assert_eq!(value["data"]["trainMeanTokenAccuracy"], 0.75);
}
