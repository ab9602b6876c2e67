/*!

This is the long-form manual for `text_sentiment` and `sentimeter`.

## Input sources

Every analysis action uses exactly one source of text, in this order:
1. an uploaded document (`.txt` or `.pdf`), when one is provided;
2. the transcription of a voice capture, when one was requested and succeeded;
3. the text field. If the field was not edited, it holds the text of the
   previous action (a transcription, a document or typed text).

A failed capture does not stop the action. The reason is shown as a message
and the text field is analyzed instead:
- `Could not understand audio.` (warning): the capture returned no words.
- `Speech recognition service unavailable` (error): the backend could not be reached.
- `No speech detected within N seconds.` (warning): the listen timeout plus
  the phrase time limit elapsed.

A document that cannot be read stops the action with an error.

## Normalization

- `trim` (default): surrounding whitespace is removed.
- `clean` (`stripNoise: true`): URLs (`http://`, `https://`, `www.`) and every
  character that is neither a letter, a digit nor a space are removed, and
  the spaces are collapsed.

Text that is empty after normalization is reported with the warning
`Please enter some text.` and nothing is scored.

## Scoring methods

- `lexicon`: `polarity` in [-1, 1] and `subjectivity` in [0, 1].
- `ruleBased`: `positive`, `neutral`, `negative` in [0, 1] (they sum to 1)
  and `compound` in [-1, 1].
- `both`: all six metrics.

## Classification policies

| policy             | metric   | labels                                                       |
|--------------------|----------|--------------------------------------------------------------|
| `polarityThreeWay` | polarity | Positive (> 0), Negative (< 0), Neutral                      |
| `compoundThreeWay` | compound | Positive (>= 0.05), Negative (<= -0.05), Neutral             |
| `polarityFiveWay`  | polarity | Very Positive (> 0.5), Slightly Positive (> 0), Neutral (0), |
|                    |          | Slightly Negative (> -0.5), Very Negative (<= -0.5)          |

The policy must be fed by the scoring method: `compoundThreeWay` needs
`ruleBased` or `both`, the polarity policies need `lexicon` or `both`.

## Configuration

`sentimeter --config settings.json` reads the following options. All of them
are optional, and the command line flags take precedence.

```json
{
  "analysisSettings": {
    "scoringMethod": "ruleBased",
    "classificationPolicy": "compoundThreeWay",
    "stripNoise": true
  },
  "captureSettings": {
    "listenTimeoutSeconds": 5,
    "phraseTimeLimitSeconds": 10
  },
  "outputSettings": {
    "recordPath": "results.csv",
    "summaryPath": "stdout"
  }
}
```

## Outputs

- The record file (`recordPath`, `--out`) is a CSV file with the columns
  `Text,Score`. One row is appended per analysis. The score is the value of
  the metric read by the classification policy.
- The summary (`summaryPath`, `--summary`) is a JSON document with the rules
  and the results of the session. It can be checked against a reference
  summary with `--reference`.

*/
